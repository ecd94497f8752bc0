//! End-to-end tests for Hearthside live in `tests/`.
//!
//! They run the real HTTP clients against wiremock stand-ins for the
//! automation backend and the completion service, and drive the intent
//! router with a scripted console.
