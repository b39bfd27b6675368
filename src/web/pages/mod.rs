pub mod announcements;
pub mod articles;
pub mod banner;
pub mod contact;
pub mod home;
pub mod press;
pub mod products;
