use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use masquerade_core::{FileSpec, Marker, StringSpec};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::errors::{AnonymizeError, Result};
use crate::options::{AnonymizeOptions, RemovalPolicy};
use crate::primitives::files::{FileStore, LocalFileStore, extension_of};
use crate::primitives::lines::line_source;
use crate::primitives::random_int;
use crate::registry::{FieldDescriptor, FieldRef, FieldShape, Registry, Schema};
use crate::report::AnonymizationReport;
use crate::strategies::{
    LengthDefaults, StringParams, StringStrategies, compile_pattern, generate_number,
};
use crate::value::GeneratedValue;

/// Replaces the marked fields of registered objects with generated values.
pub struct Anonymizer {
    registry: Arc<Registry>,
    options: AnonymizeOptions,
    files: Box<dyn FileStore>,
    rng: ChaCha8Rng,
    report: AnonymizationReport,
}

impl Anonymizer {
    pub fn new(registry: impl Into<Arc<Registry>>, options: AnonymizeOptions) -> Result<Self> {
        options.validate()?;
        let seed = options.seed.unwrap_or_else(rand::random);
        debug!(seed, "anonymizer seeded");
        let files = Box::new(LocalFileStore::new(options.file_content_paragraphs));
        Ok(Self {
            registry: registry.into(),
            options,
            files,
            rng: ChaCha8Rng::seed_from_u64(seed),
            report: AnonymizationReport::default(),
        })
    }

    /// Replaces the local filesystem with another file collaborator.
    pub fn with_file_store(mut self, files: impl FileStore + 'static) -> Self {
        self.files = Box::new(files);
        self
    }

    pub fn report(&self) -> &AnonymizationReport {
        &self.report
    }

    /// Returns the accumulated report and starts a new one.
    pub fn take_report(&mut self) -> AnonymizationReport {
        std::mem::take(&mut self.report)
    }

    /// Anonymizes one object in place.
    ///
    /// Fails before touching anything when `object` is `None` or when `T`
    /// has no schema in the registry. Any later failure aborts the object;
    /// fields already processed keep their new values.
    pub fn anonymize<T: 'static>(&mut self, object: Option<&mut T>) -> Result<()> {
        let type_name = std::any::type_name::<T>();
        let object = object.ok_or_else(|| {
            AnonymizeError::Anonymization(format!("no {type_name} instance to anonymize"))
        })?;
        let registry = Arc::clone(&self.registry);
        let schema = registry.schema::<T>().ok_or_else(|| {
            AnonymizeError::Anonymization(format!("{type_name} is not registered"))
        })?;
        self.randomize(schema, object)
    }

    /// Anonymizes every object in order, stopping at the first failure.
    pub fn anonymize_all<'a, T, I>(&mut self, objects: Option<I>) -> Result<()>
    where
        T: 'static,
        I: IntoIterator<Item = &'a mut T>,
    {
        let objects = objects.ok_or_else(|| {
            AnonymizeError::Anonymization(format!(
                "no sequence of {} to anonymize",
                std::any::type_name::<T>()
            ))
        })?;
        for (index, object) in objects.into_iter().enumerate() {
            if let Err(err) = self.anonymize(Some(object)) {
                warn!(index, error = %err, "anonymization aborted");
                return Err(err);
            }
        }
        Ok(())
    }

    fn randomize<T: 'static>(&mut self, schema: &Schema<T>, object: &mut T) -> Result<()> {
        let start = Instant::now();
        for descriptor in schema.fields() {
            self.randomize_field(schema.type_name(), descriptor, object)?;
        }
        for hook in schema.hooks() {
            hook.invoke(schema.type_name(), object)?;
            self.report.hooks_invoked += 1;
        }
        self.report.objects_anonymized += 1;
        info!(
            type_name = schema.type_name(),
            fields = schema.fields().len(),
            hooks = schema.hooks().len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "object anonymized"
        );
        Ok(())
    }

    fn randomize_field<T: 'static>(
        &mut self,
        type_name: &'static str,
        descriptor: &FieldDescriptor<T>,
        object: &mut T,
    ) -> Result<()> {
        let field = FieldRef {
            type_name,
            field: descriptor.name(),
        };
        let Some(marker) = descriptor.markers().select() else {
            debug!(type_name, field = field.field, "field has no marker");
            return Ok(());
        };
        let binding = descriptor.binding();
        if !binding.is_present(field, object)? {
            debug!(type_name, field = field.field, "field unset, skipped");
            self.report.record_skipped();
            return Ok(());
        }

        let shape = binding.shape();
        let count = match shape {
            FieldShape::Scalar => 1,
            FieldShape::Collection(kind) if kind.is_appendable() => {
                let repetition = marker.repetition();
                if repetition.min > repetition.max {
                    return Err(AnonymizeError::Configuration(format!(
                        "field '{}' of {type_name}: repetition min {} must be <= max {}",
                        field.field, repetition.min, repetition.max
                    )));
                }
                random_int(
                    &mut self.rng,
                    i64::from(repetition.min),
                    i64::from(repetition.max),
                ) as usize
            }
            FieldShape::Collection(kind) => {
                return Err(AnonymizeError::UnsupportedContainer {
                    type_name,
                    field: field.field,
                    container: kind.as_str(),
                });
            }
        };

        // Resolve the writer before generating: file markers have side effects.
        binding.check_writable(field)?;

        let (strategy, values) = match marker {
            Marker::Number(spec) => {
                let values = (0..count)
                    .map(|_| generate_number(spec, &mut self.rng))
                    .collect::<Result<Vec<_>>>()?;
                (format!("number.{}", spec.domain.as_str()), values)
            }
            Marker::String(spec) => {
                let values = self
                    .generate_strings(spec, count)?
                    .into_iter()
                    .map(GeneratedValue::Text)
                    .collect();
                (format!("string.{}", spec.domain.as_str()), values)
            }
            Marker::File(spec) => {
                let current = binding.current_text(field, object)?;
                let path = self.replace_file(spec, &current)?;
                ("file".to_string(), vec![path])
            }
        };

        let generated = values.len() as u64;
        let stored = binding.store(field, object, values)? as u64;
        self.report.record_strategy(&strategy, generated);
        match shape {
            FieldShape::Scalar => self.report.record_replaced(),
            FieldShape::Collection(_) => self.report.record_appended(stored),
        }
        debug!(
            type_name,
            field = field.field,
            marker = marker.kind().as_str(),
            strategy = %strategy,
            values = generated,
            "field anonymized"
        );
        Ok(())
    }

    fn generate_strings(&mut self, spec: &StringSpec, count: usize) -> Result<Vec<String>> {
        let bounded = spec.min_length.is_some() || spec.max_length.is_some();
        if bounded && !spec.domain.uses_length() {
            debug!(domain = %spec.domain, "length bounds ignored by this domain");
        }
        let regex = compile_pattern(spec, self.options.max_regex_repeat)?;
        let params = StringParams::from_spec(spec, regex.as_ref());
        let strategies = StringStrategies::new(
            LengthDefaults {
                min: self.options.default_min_length,
                max: self.options.default_max_length,
            },
            line_source(),
        );
        (0..count)
            .map(|_| strategies.generate(spec.domain, &params, &mut self.rng))
            .collect()
    }

    fn replace_file(&mut self, spec: &FileSpec, current: &str) -> Result<GeneratedValue> {
        if spec.remove_previous {
            match self.files.delete(Path::new(current)) {
                Ok(()) => self.report.files_removed += 1,
                Err(err) => match self.options.removal_policy {
                    RemovalPolicy::Strict => return Err(err),
                    RemovalPolicy::BestEffort => {
                        warn!(path = current, error = %err, "previous file not removed");
                        self.report.removal_failures += 1;
                    }
                },
            }
        }

        let name = self
            .generate_strings(&spec.name, 1)?
            .pop()
            .unwrap_or_default();
        let path = self.files.materialize(
            &spec.directory,
            &name,
            extension_of(current),
            &mut self.rng,
        )?;
        self.report.files_materialized += 1;
        Ok(GeneratedValue::Text(path.to_string_lossy().into_owned()))
    }
}

impl std::fmt::Debug for Anonymizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anonymizer")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("report", &self.report)
            .finish()
    }
}
