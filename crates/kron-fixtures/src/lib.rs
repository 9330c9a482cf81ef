//! # kron-fixtures
//!
//! Self-checking C test fixtures for Kronecker-product kernels.
//!
//! Each fixture embeds two operand matrices and their exact reference
//! product `A ⊗ B` as C array literals, runs `kernel_kron_prod_rec` on
//! the operands and compares its output against the reference.
//!
//! ## Modules
//!
//! - [`matrix`] - Validated dense `f64` matrices
//! - [`kron`] - Reference Kronecker product
//! - [`literal`] - Round-trip-exact C initializer rendering and parsing
//! - [`template`] - C translation unit assembly
//! - [`fixture`] - Operands, reference and source of one fixture
//! - [`generate`] - Seeded single-shot and batch drivers
//! - [`plan`] - YAML generation plans
//! - [`check`] - Consistency checks for generated fixtures

pub mod check;
pub mod error;
pub mod fixture;
pub mod generate;
pub mod kron;
pub mod literal;
pub mod matrix;
pub mod plan;
pub mod template;
