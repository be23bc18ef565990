mod ecma_compiler;
mod oxc_transpiler;
mod parsed_module;

pub use crate::{
  ecma_compiler::EcmaCompiler, oxc_transpiler::OxcTranspiler, parsed_module::ParsedModule,
};
