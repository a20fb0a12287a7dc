//! Core use-case services.
//!
//! # Responsibility
//! - Turn shell actions into note mutations plus the saves they require.
//! - Keep UI layers decoupled from storage details.

pub mod board_service;
