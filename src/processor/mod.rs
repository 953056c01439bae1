//! The processing driver.
//!
//! One [`Processor::process`] call is one invocation: it builds a shell for
//! every marked declaration, builds and attaches every column, validates
//! the resulting graph and finally runs each generator over each type. The
//! first error of any stage aborts the run and nothing is generated.
//!
//! ```
//! use storio_codegen::prelude::*;
//!
//! let file: syn::File = syn::parse_quote! {
//!     #[storio_sqlite_type(table = "books")]
//!     pub struct Book {
//!         #[storio_sqlite_column(name = "_id", key)]
//!         pub id: i64,
//!         #[storio_sqlite_column(name = "title")]
//!         pub title: String,
//!     }
//! };
//!
//! let config = ProcessorConfig::default();
//! let round = Round::from_file(&file, config.module_segments(), &SqliteBackend::MARKERS).unwrap();
//! let output = Processor::new(SqliteBackend, &config).unwrap().process(&round).unwrap();
//! assert_eq!(output.units.len(), 4);
//! ```

pub mod aggregate;
pub mod builders;
mod output;

use std::marker::PhantomData;
use std::time::Instant;

use log::{debug, trace};

use crate::backends::Backend;
use crate::config::ProcessorConfig;
use crate::elements::Round;
use crate::error::{CodegenResult, ProcessingResult};
use crate::generate::{GenerationContext, Generator};
use crate::introspection::{RustTypeIntrospector, TypeIntrospector};

pub use aggregate::{Shells, attach, validate_graph};
pub use builders::{build_column, build_type_shell};
pub use output::ProcessingOutput;

pub struct Processor<B: Backend, I: TypeIntrospector = RustTypeIntrospector> {
    introspector: I,
    generators: Vec<Box<dyn Generator>>,
    context: GenerationContext,
    _backend: PhantomData<B>,
}

impl<B: Backend> Processor<B> {
    /// A processor with the backend's four generators and the Rust type
    /// introspector. Fails only when the configured runtime path is invalid.
    pub fn new(_backend: B, config: &ProcessorConfig) -> CodegenResult<Self> {
        let runtime = config.runtime_path_or(B::DEFAULT_RUNTIME)?;
        Ok(Self {
            introspector: RustTypeIntrospector,
            generators: B::generators(),
            context: GenerationContext {
                runtime,
                docs: config.generated_docs,
            },
            _backend: PhantomData,
        })
    }
}

impl<B: Backend, I: TypeIntrospector> Processor<B, I> {
    /// Replace the generator strategies. They run in the given order for
    /// every type.
    pub fn with_generators(mut self, generators: Vec<Box<dyn Generator>>) -> Self {
        self.generators = generators;
        self
    }

    pub fn with_introspector<J: TypeIntrospector>(self, introspector: J) -> Processor<B, J> {
        Processor {
            introspector,
            generators: self.generators,
            context: self.context,
            _backend: PhantomData,
        }
    }

    pub fn generators(&self) -> &[Box<dyn Generator>] {
        &self.generators
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    pub fn process(&self, round: &Round) -> ProcessingResult<ProcessingOutput> {
        let start = Instant::now();
        debug!(
            "Processor[{}]: Processing {} declaration(s) and {} column(s)",
            B::NAME,
            round.declarations.len(),
            round.columns.len()
        );

        let mut shells = Shells::new();
        for (id, declaration) in round.marked_declarations() {
            let shell = build_type_shell::<B>(declaration)?;
            trace!("Processor[{}]: Built shell {}", B::NAME, shell.qualified_name());
            shells.insert(id, shell);
        }

        for element in &round.columns {
            let column = build_column::<B, I>(element, round, &self.introspector)?;
            attach::<B>(column, &mut shells)?;
        }

        validate_graph::<B>(&shells)?;

        let types: Vec<_> = shells.into_values().collect();
        let units = types
            .iter()
            .flat_map(|meta| {
                self.generators
                    .iter()
                    .map(move |generator| generator.generate(meta, &self.context))
            })
            .collect::<Vec<_>>();

        debug!(
            "Processor[{}]: Generated {} unit(s) for {} type(s) in {:?}",
            B::NAME,
            units.len(),
            types.len(),
            start.elapsed()
        );

        Ok(ProcessingOutput { types, units })
    }
}
