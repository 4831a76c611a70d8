// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `path_tree`: tree shape is independent of declaration order
//! - `naming`: derived names and tags are deterministic
//! - `resolution`: layered configuration precedence

mod naming;
mod path_tree;
mod resolution;
