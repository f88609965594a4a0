//! Utility functions for code generation, URL processing, and request handling.
//!
//! This module provides the small collaborators used by the shorten flow:
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - URL syntax check (`is_url`)
//! - [`domain_guard`] - Destination domain blocklist (`is_allowed_domain`)
//! - [`url_normalizer`] - Scheme enforcement (`enforce_scheme`)
//! - [`client_ip`] - Client identity extraction for quota tracking

pub mod client_ip;
pub mod code_generator;
pub mod domain_guard;
pub mod url_normalizer;
pub mod url_validator;
