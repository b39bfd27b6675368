pub mod announcement;
pub mod article;
pub mod contact;
pub mod media;
pub mod pagination;
pub mod press;
pub mod product;
pub mod statistic;

pub use announcement::*;
pub use article::*;
pub use contact::*;
pub use media::*;
pub use pagination::*;
pub use press::*;
pub use product::*;
pub use statistic::*;
