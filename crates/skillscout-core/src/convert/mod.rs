//! Content converters: already-fetched artifact text to partial records.
//!
//! Both converters are pure functions over text and always produce a
//! mapping; a document they cannot make sense of simply yields fewer keys.

mod desktop;
mod readme;

pub use desktop::desktop_to_record;
pub use readme::readme_to_record;
