//! # texture-jobs
//!
//! Parallel compilation orchestrator for texture-notes.
//!
//! The catalog's job ends once it has produced a reconciled, immutable
//! list of note records; this crate takes that list and drives an
//! external LaTeX compiler over the corresponding files, one task per
//! file, bounded by the configured concurrency. Tasks touch disjoint
//! files and never mutate the catalog, so the only coordination is the
//! work queue itself and the join barrier before reporting.

pub mod compiler;
pub mod queue;

pub use compiler::{CompileOutcome, Compiler, LatexmkCompiler};
pub use queue::{compile_notes, CompileConfig, CompileFailure, CompileReport, CompileTask};
