//! Vertree Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Vertree layout
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: Version identifiers ([`identifier::VersionId`])
//! - **Colors**: CSS color parsing for rendering ([`color::Color`])
//! - **Geometry**: Points, sizes, bounds and insets ([`geometry`] module)
//! - **Metrics**: Text measurement used to size node boxes ([`metrics`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod metrics;
