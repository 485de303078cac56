//! One [`CodeEmitter`](super::CodeEmitter) per target language.

mod cpp;
mod go;
mod python;
mod rust;

pub use cpp::CppEmitter;
pub use go::GoEmitter;
pub use python::PythonEmitter;
pub use rust::RustEmitter;
