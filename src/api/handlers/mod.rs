pub mod announcements;
pub mod banner;
pub mod contact;
pub mod content;
pub mod root;
