//! Scholia Core Types and Definitions
//!
//! This crate provides the foundational types for the Scholia annotation
//! framework for primary-school science diagrams. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Pixel-space geometric types ([`geometry`] module)
//! - **Elements**: Diagram element classification ([`element::ElementKind`])
//! - **Relations**: The full rhetorical relation inventory ([`relation`] module)
//! - **Taxonomy**: The semantic relation scheme and participant roles
//!   ([`taxonomy`] module)

pub mod element;
pub mod geometry;
pub mod identifier;
pub mod relation;
pub mod taxonomy;
