pub mod antibody;
pub mod config;
pub mod consts;
pub mod error;
pub mod families;
pub mod optimizer;
pub mod scorer;
// cmd and reports are binary modules (see main.rs).
