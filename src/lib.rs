pub mod announcements;
pub mod api;
pub mod cms;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod security;
pub mod service;
pub mod web;
