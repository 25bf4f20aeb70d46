//! Skill record schema and the resolution pipeline.

mod resolver;
mod schema;

pub use resolver::SkillResolver;
pub use schema::SkillRecord;
