//! Service layer for the AskForge API.

pub mod chat;
