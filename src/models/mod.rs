//! Data models for dictionary entities.
//!
//! This module contains the data structures used to represent the
//! crowdsourced dictionary:
//!
//! - `Neologism`, `NeologismStatus`: invented words and their workflow state
//! - `Category`: word categories
//! - Wire rows (`NeologismRow`, insert/patch payloads) for the remote service

pub mod category;
pub mod neologism;

pub use category::{Category, NewCategoryRow};
pub use neologism::{
    Neologism, NeologismDraft, NeologismPatch, NeologismRow, NeologismStatus, NewNeologismRow,
};
