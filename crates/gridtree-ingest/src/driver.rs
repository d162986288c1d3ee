//! The ingestion driver.
//!
//! Drives one or many sources against a shared [`Model`], applying the
//! error policy. Sources are processed sequentially in input order; the
//! group, attribute, and domain namespaces accumulate across sources within
//! one run.

use std::path::PathBuf;

use tracing::{debug, info, info_span, warn};

use gridtree_model::{Attribute, Group, Model};

use crate::builder::{GroupOutcome, TreeBuilder};
use crate::classify::{RowKind, classify, explicit_attribute_target, resolve_parent_id};
use crate::error::{Result, RowError, SourceError};
use crate::grid::{GridSource, non_blank, open_grid};
use crate::layout::SheetLayout;
use crate::typespec::resolve_length_spec;

/// What to do with a recoverable row-level failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// The first row-level error aborts the entire multi-source run.
    #[default]
    Strict,
    /// Skip the offending row with a warning and keep scanning.
    ContinueOnErrors,
}

/// Per-source ingestion counts.
#[derive(Debug, Clone, Default)]
pub struct SourceSummary {
    pub source: String,
    pub object_name: String,
    /// Groups created for this source, including the root.
    pub groups: usize,
    /// Attribute rows ingested.
    pub attributes: usize,
    /// Rows skipped under the continue-on-errors policy.
    pub skipped_rows: usize,
    /// Attribute names redefined with a different signature.
    pub duplicate_definitions: usize,
}

/// Outcome of a whole run. Failed sources only appear under the
/// continue-on-errors policy; the strict policy surfaces the first failure
/// as an error instead.
#[derive(Debug, Default)]
pub struct RunReport {
    pub sources: Vec<SourceSummary>,
    pub failures: Vec<(String, SourceError)>,
}

impl RunReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Orchestrates classification, tree building, type resolution, and domain
/// registration for a run. Owns the accumulating model for the run's
/// duration.
pub struct IngestionDriver {
    layout: SheetLayout,
    policy: ErrorPolicy,
    model: Model,
}

impl IngestionDriver {
    pub fn new(layout: SheetLayout, policy: ErrorPolicy) -> Self {
        Self {
            layout,
            policy,
            model: Model::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Hand the accumulated model to the emitter.
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Ingest every source in input order.
    ///
    /// Under the strict policy the first failure of any kind aborts the run;
    /// under continue-on-errors, failed sources are recorded in the report
    /// and later sources still ingest into the same model.
    pub fn run(&mut self, paths: &[PathBuf]) -> Result<RunReport> {
        let mut report = RunReport::default();
        for path in paths {
            let outcome = open_grid(path, &self.layout)
                .and_then(|grid| self.ingest_source(grid.as_ref()));
            match outcome {
                Ok(summary) => report.sources.push(summary),
                Err(error) => match self.policy {
                    ErrorPolicy::Strict => return Err(error),
                    ErrorPolicy::ContinueOnErrors => {
                        warn!(source = %path.display(), %error, "skipping source");
                        report.failures.push((path.display().to_string(), error));
                    }
                },
            }
        }
        Ok(report)
    }

    /// Ingest one source.
    ///
    /// Resolves the root object name and description (both required), then
    /// scans rows from the configured start until end-of-data. A source
    /// that yields zero attributes fails regardless of policy.
    pub fn ingest_source(&mut self, grid: &dyn GridSource) -> Result<SourceSummary> {
        let source = grid.source_id().to_string();
        let span = info_span!("source", source = %source);
        let _guard = span.enter();

        let layout = self.layout.clone();
        let policy = self.policy;

        let object_name = non_blank(grid.cell(layout.object_name_row, layout.object_name_column))
            .ok_or_else(|| SourceError::MissingObjectName {
                source_id: source.clone(),
                row: layout.object_name_row,
                column: layout.object_name_column,
            })?;
        let object_desc = non_blank(grid.cell(layout.object_desc_row, layout.object_desc_column))
            .ok_or_else(|| SourceError::MissingObjectDescription {
                source_id: source.clone(),
                row: layout.object_desc_row,
                column: layout.object_desc_column,
            })?;
        info!(object = %object_name, description = %object_desc, "processing object definition");

        let root = self
            .model
            .add_root(Group::new(object_name.clone(), Some(object_desc))?);
        let mut builder = TreeBuilder::new(&mut self.model, root);

        let mut summary = SourceSummary {
            source: source.clone(),
            object_name,
            groups: 1,
            ..SourceSummary::default()
        };

        let mut row = layout.data_start_row;
        loop {
            match process_row(grid, &layout, &mut builder, row) {
                Ok(RowOutcome::EndOfData) => break,
                Ok(RowOutcome::Group) => summary.groups += 1,
                Ok(RowOutcome::Root) => {}
                Ok(RowOutcome::Attribute { name, redefined }) => {
                    summary.attributes += 1;
                    if redefined {
                        summary.duplicate_definitions += 1;
                    }
                    debug!(attribute = %name, row, "ingested attribute");
                }
                Err(error) => {
                    recover(policy, &source, row, error, &mut summary)?;
                }
            }
            row += 1;
        }

        if summary.attributes == 0 {
            return Err(SourceError::EmptyDefinition { source_id: source });
        }

        info!(
            groups = summary.groups,
            attributes = summary.attributes,
            skipped = summary.skipped_rows,
            "source complete"
        );
        Ok(summary)
    }
}

/// Apply the error policy to a row-level failure.
fn recover(
    policy: ErrorPolicy,
    source: &str,
    row: u32,
    error: RowError,
    summary: &mut SourceSummary,
) -> Result<()> {
    match policy {
        ErrorPolicy::Strict => Err(SourceError::Row {
            source_id: source.to_string(),
            error,
        }),
        ErrorPolicy::ContinueOnErrors => {
            warn!(source, row, %error, "skipping row");
            summary.skipped_rows += 1;
            Ok(())
        }
    }
}

enum RowOutcome {
    EndOfData,
    /// Group row re-asserting id 0.
    Root,
    Group,
    Attribute {
        name: String,
        redefined: bool,
    },
}

fn process_row(
    grid: &dyn GridSource,
    layout: &SheetLayout,
    builder: &mut TreeBuilder<'_>,
    row: u32,
) -> std::result::Result<RowOutcome, RowError> {
    match classify(grid, layout, row)? {
        RowKind::EndOfData => Ok(RowOutcome::EndOfData),
        RowKind::Group { id } => {
            let parent = resolve_parent_id(grid, layout, row);
            let name = non_blank(grid.cell(row, layout.name_column));
            let description = non_blank(grid.cell(row, layout.description_column));
            match builder.declare_group(
                row,
                id,
                layout.id_column,
                parent,
                name,
                layout.name_column,
                description,
            )? {
                GroupOutcome::Root(_) => Ok(RowOutcome::Root),
                GroupOutcome::Created(_) => Ok(RowOutcome::Group),
            }
        }
        RowKind::Attribute => {
            let (target, attribute) = read_attribute(grid, layout, row)?;
            if let (Some(base), Some(token)) = (&attribute.base_type, &attribute.type_token) {
                // First-write-wins; a failed registration cannot happen for
                // a non-blank base type name.
                let _ = builder.register_domain(base, token);
            }
            let name = attribute.name.clone();
            let signature = attribute.signature();
            let (_, previous) = builder.attach(target, attribute);
            let redefined = match previous {
                Some(previous) if previous.signature() != signature => {
                    warn!(
                        attribute = %name,
                        previous = %previous.signature(),
                        current = %signature,
                        "attribute was already defined with a different data type; taking the last definition"
                    );
                    true
                }
                _ => false,
            };
            Ok(RowOutcome::Attribute { name, redefined })
        }
    }
}

/// Build an attribute from one classified attribute row.
fn read_attribute(
    grid: &dyn GridSource,
    layout: &SheetLayout,
    row: u32,
) -> std::result::Result<(Option<u32>, Attribute), RowError> {
    // Only the root group may carry reference id 0.
    if let Some(raw) = non_blank(grid.cell(row, layout.id_column)) {
        if raw.parse::<u32>() == Ok(0) {
            return Err(RowError::MalformedIdentifier {
                row,
                column: layout.id_column,
                value: raw,
            });
        }
    }

    let name =
        non_blank(grid.cell(row, layout.name_column)).ok_or(RowError::MissingAttributeName {
            row,
            column: layout.name_column,
        })?;
    let mut attribute = Attribute::new(name).map_err(|_| RowError::MissingAttributeName {
        row,
        column: layout.name_column,
    })?;
    attribute.description = non_blank(grid.cell(row, layout.description_column));
    attribute.type_token =
        non_blank(grid.cell(row, layout.type_column)).map(|token| token.to_lowercase());
    attribute.base_type = non_blank(grid.cell(row, layout.base_type_column));

    // The shared type governs representation; length/decimals resolution
    // only applies to inline types.
    if attribute.base_type.is_none() {
        if let Some(spec) = grid.cell(row, layout.length_column) {
            let resolved = resolve_length_spec(&spec);
            attribute.length = resolved.length;
            attribute.decimals = resolved.decimals;
            attribute.sign = resolved.sign;
        }
    }

    let target = explicit_attribute_target(grid, layout, row);
    Ok((target, attribute))
}
