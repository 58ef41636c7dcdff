pub mod command;
pub mod controller;
pub mod domain;
pub mod filters;
pub mod library;
pub mod negotiation;
pub mod repository;
