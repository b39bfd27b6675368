pub mod csrf;

pub use csrf::CsrfService;
