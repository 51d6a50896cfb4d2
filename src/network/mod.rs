// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Exchange interception
//!
//! Wraps a downstream [`Chain`] and writes a record for every request,
//! response and failure that passes through it.

mod chain;
mod config;
mod interceptor;

pub use chain::{Chain, FnChain};
pub use config::{InterceptorConfig, LogMorphBuilder, DEFAULT_TAG};
pub use interceptor::LogMorphInterceptor;
