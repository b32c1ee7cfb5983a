//! Pipeline orchestrator.

use std::{path::PathBuf, time::Instant};

use tracing::{info, warn};
use wiregen_core::{File, Location};
use wiregen_schema::{CodegenTarget, SchemaLoader, TypeGraph};

use super::{Diagnostic, Stage};
use crate::{
    Error, Result,
    emit::{EmissionRecord, Emitter, emitted_types},
    input::PipelineInput,
    prune::{PruneReport, RuleSet, prune},
    roots::{ArchiveMounter, MountedRoots, TarMounter},
};

/// What a run did.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Number of files in the loaded graph, imports included.
    pub files_loaded: usize,
    pub prune: PruneReport,
    /// Files whose types are emitted, in emission order.
    pub emitted_files: Vec<Location>,
    /// Written types. Empty for checks and dry runs.
    pub emitted: Vec<EmissionRecord>,
    /// Rendered files of a dry run.
    pub previews: Vec<File>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PipelineReport {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }
}

/// The generation pipeline.
///
/// # Example
///
/// ```ignore
/// let report = Pipeline::new(input, "out")
///     .rules(rules)
///     .dry_run(true)
///     .run(&loader, &target)?;
/// ```
pub struct Pipeline {
    input: PipelineInput,
    output_dir: PathBuf,
    rules: RuleSet,
    dry_run: bool,
    mounter: Box<dyn ArchiveMounter>,
}

impl Pipeline {
    /// Create a pipeline with no prune rules that writes under `output_dir`.
    pub fn new(input: PipelineInput, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output_dir: output_dir.into(),
            rules: RuleSet::default(),
            dry_run: false,
            mounter: Box::new(TarMounter),
        }
    }

    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Render generated files into the report instead of writing them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Replace the mounter used for archive roots.
    pub fn mounter(mut self, mounter: impl ArchiveMounter + 'static) -> Self {
        self.mounter = Box::new(mounter);
        self
    }

    /// Run every stage, emitting the retained types of the explicit files.
    ///
    /// # Errors
    ///
    /// Returns the first mount, resolution, schema or write failure.
    pub fn run(&self, loader: &dyn SchemaLoader, target: &dyn CodegenTarget) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let mounted = self.mount(&mut report)?;
        let graph = self.load(&mounted, loader, &mut report)?;
        let graph = self.prune(&graph, &mut report);

        let explicit = self.input.explicit_files();
        report.emitted_files = emitted_files(&graph, explicit);

        let generator = target.generator(&graph);
        let emitter = Emitter::new(generator.as_ref(), &self.output_dir);
        if self.dry_run {
            report.previews = emitter.preview(&graph, explicit)?;
            report.diagnostics.push(Diagnostic::info(
                Stage::Emit,
                format!("Rendered {} {} files", report.previews.len(), target.language()),
            ));
        } else {
            report.emitted = emitter.emit(&graph, explicit)?;
            report.diagnostics.push(
                Diagnostic::info(
                    Stage::Emit,
                    format!("Generated {} {} files", report.emitted.len(), target.language()),
                )
                .at(self.output_dir.display().to_string()),
            );
        }

        Ok(report)
    }

    /// Run up to and including pruning, without emitting.
    pub fn check(&self, loader: &dyn SchemaLoader) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let mounted = self.mount(&mut report)?;
        let graph = self.load(&mounted, loader, &mut report)?;
        let graph = self.prune(&graph, &mut report);
        report.emitted_files = emitted_files(&graph, self.input.explicit_files());
        Ok(report)
    }

    fn mount(&self, report: &mut PipelineReport) -> Result<MountedRoots> {
        let mounted = MountedRoots::mount_with(self.input.roots(), self.mounter.as_ref())?;
        if mounted.mount_count() > 0 {
            info!("Mounted {} archive roots", mounted.mount_count());
        }
        report.diagnostics.push(Diagnostic::info(
            Stage::Mount,
            format!(
                "{} search roots, {} archives mounted",
                mounted.len(),
                mounted.mount_count()
            ),
        ));
        Ok(mounted)
    }

    fn load(
        &self,
        mounted: &MountedRoots,
        loader: &dyn SchemaLoader,
        report: &mut PipelineReport,
    ) -> Result<TypeGraph> {
        let request = self.input.load_request(mounted)?;
        report.diagnostics.push(Diagnostic::info(
            Stage::Locate,
            format!("{} source entries", request.sources.len()),
        ));

        let start = Instant::now();
        let graph = loader.load_schema(&request).map_err(Error::schema)?;
        let elapsed = start.elapsed();
        info!("Loaded {} proto files in {:?}", graph.files().len(), elapsed);

        report.files_loaded = graph.files().len();
        report.diagnostics.push(Diagnostic::info(
            Stage::Load,
            format!("Loaded {} proto files in {:?}", graph.files().len(), elapsed),
        ));
        Ok(graph)
    }

    fn prune(&self, graph: &TypeGraph, report: &mut PipelineReport) -> TypeGraph {
        let start = Instant::now();
        let (pruned, prune_report) = prune(&self.rules, graph);
        let elapsed = start.elapsed();

        if !self.rules.is_empty() {
            let message = format!(
                "Pruned schema from {} types to {} types in {:?}",
                prune_report.types_before, prune_report.types_after, elapsed
            );
            info!("{message}");
            report.diagnostics.push(Diagnostic::info(Stage::Prune, message));
        }
        for rule in &prune_report.unused_includes {
            warn!("Unused include: {rule}");
            report
                .diagnostics
                .push(Diagnostic::warning(Stage::Prune, "include matched no types").at(rule));
        }
        for rule in &prune_report.unused_excludes {
            warn!("Unused exclude: {rule}");
            report
                .diagnostics
                .push(Diagnostic::warning(Stage::Prune, "exclude matched no types").at(rule));
        }

        report.prune = prune_report;
        pruned
    }
}

fn emitted_files(graph: &TypeGraph, explicit: &[String]) -> Vec<Location> {
    let mut files: Vec<Location> = Vec::new();
    for ty in emitted_types(graph, explicit) {
        if files.last() != Some(&ty.location) {
            files.push(ty.location.clone());
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use wiregen_schema::{ProtoFile, ProtoType, TypeKind};

    use super::*;
    use crate::testing::{CountingMounter, EchoTarget, StaticLoader, write_tree};

    struct Fixture {
        root: TempDir,
        out: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            write_tree(root.path(), &[("a.proto", ""), ("b.proto", "")]).unwrap();
            Self {
                root,
                out: TempDir::new().unwrap(),
            }
        }

        fn root(&self) -> String {
            self.root.path().display().to_string()
        }

        fn archive(&self) -> String {
            let archive = self.root.path().join("deps.tar");
            fs::write(&archive, "").unwrap();
            archive.display().to_string()
        }

        fn location(&self, path: &str) -> Location {
            Location::new(self.root(), path)
        }

        /// a.proto declares demo.A; its import b.proto declares dep.B.
        fn graph(&self) -> TypeGraph {
            let mut a = ProtoFile::new(self.location("a.proto"), "demo");
            a.imports.push("b.proto".into());
            a.types.push(ProtoType::new("demo.A", "demo", TypeKind::Message, self.location("a.proto")));
            let mut b = ProtoFile::new(self.location("b.proto"), "dep");
            b.types.push(ProtoType::new("dep.B", "dep", TypeKind::Message, self.location("b.proto")));
            TypeGraph::new(vec![a, b])
        }

        fn pipeline(&self, roots: Vec<String>, files: &[&str]) -> Pipeline {
            let files = files.iter().map(|f| f.to_string()).collect();
            Pipeline::new(PipelineInput::new(roots, files), self.out.path())
        }
    }

    #[test]
    fn test_run_emits_explicit_files_only() {
        let fx = Fixture::new();
        let loader = StaticLoader::new(fx.graph());

        let report = fx
            .pipeline(vec![fx.root()], &["a.proto"])
            .run(&loader, &EchoTarget)
            .unwrap();

        assert_eq!(report.files_loaded, 2);
        assert_eq!(report.emitted.len(), 1);
        assert_eq!(report.emitted_files, [fx.location("a.proto")]);
        assert!(fx.out.path().join("demo/A.txt").is_file());
        assert!(!fx.out.path().join("dep").exists());
    }

    #[test]
    fn test_loader_receives_located_sources() {
        let fx = Fixture::new();
        let loader = StaticLoader::new(fx.graph());

        fx.pipeline(vec![fx.root()], &["a.proto"])
            .run(&loader, &EchoTarget)
            .unwrap();

        let requests = loader.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].sources[0].location(), &fx.location("a.proto"));
        assert_eq!(requests[0].import_roots.len(), 1);
    }

    #[test]
    fn test_mounts_released_after_success() {
        let fx = Fixture::new();
        let mounter = CountingMounter::new();
        let loader = StaticLoader::new(fx.graph());

        fx.pipeline(vec![fx.root(), fx.archive()], &["a.proto"])
            .mounter(mounter.clone())
            .run(&loader, &EchoTarget)
            .unwrap();

        assert_eq!(mounter.mounted(), 1);
        assert_eq!(mounter.released(), 1);
    }

    #[test]
    fn test_mounts_released_when_load_fails() {
        let fx = Fixture::new();
        let mounter = CountingMounter::new();
        let loader = StaticLoader::failing("bad syntax");

        let err = fx
            .pipeline(vec![fx.archive(), fx.root()], &["a.proto"])
            .mounter(mounter.clone())
            .run(&loader, &EchoTarget)
            .unwrap_err();

        assert!(matches!(*err, Error::Schema(_)));
        assert_eq!(mounter.mounted(), 1);
        assert_eq!(mounter.released(), 1);
    }

    #[test]
    fn test_mounts_released_when_locate_fails() {
        let fx = Fixture::new();
        let mounter = CountingMounter::new();
        let loader = StaticLoader::new(fx.graph());

        let err = fx
            .pipeline(vec![fx.archive()], &["missing.proto"])
            .mounter(mounter.clone())
            .run(&loader, &EchoTarget)
            .unwrap_err();

        assert!(matches!(*err, Error::Resolution { .. }));
        assert!(loader.requests().is_empty());
        assert_eq!(mounter.released(), 1);
    }

    #[test]
    fn test_mounts_released_when_write_fails() {
        let fx = Fixture::new();
        let mounter = CountingMounter::new();
        let loader = StaticLoader::new(fx.graph());
        let blocker = fx.out.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();

        let input = PipelineInput::new(vec![fx.archive(), fx.root()], vec!["a.proto".to_string()]);
        let err = Pipeline::new(input, &blocker)
            .mounter(mounter.clone())
            .run(&loader, &EchoTarget)
            .unwrap_err();

        assert!(matches!(*err, Error::Write { .. }));
        assert_eq!(mounter.mounted(), 1);
        assert_eq!(mounter.released(), 1);
    }

    #[test]
    fn test_unused_rules_warn_without_failing() {
        let fx = Fixture::new();
        let loader = StaticLoader::new(fx.graph());

        let report = fx
            .pipeline(vec![fx.root()], &["a.proto"])
            .rules(RuleSet::new(["demo.A", "pkg.Foo"], ["gone"]))
            .run(&loader, &EchoTarget)
            .unwrap();

        let warnings: Vec<_> = report.warnings().map(|d| d.location.clone()).collect();
        assert_eq!(warnings, [Some("pkg.Foo".to_string()), Some("gone".to_string())]);
        assert_eq!(report.emitted.len(), 1);
    }

    #[test]
    fn test_pruned_away_types_are_not_emitted() {
        let fx = Fixture::new();
        let loader = StaticLoader::new(fx.graph());

        let report = fx
            .pipeline(vec![fx.root()], &[])
            .rules(RuleSet::default().include("dep"))
            .run(&loader, &EchoTarget)
            .unwrap();

        assert_eq!(report.prune.types_before, 2);
        assert_eq!(report.prune.types_after, 1);
        assert_eq!(report.emitted_files, [fx.location("b.proto")]);
        assert!(!fx.out.path().join("demo").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let fx = Fixture::new();
        let loader = StaticLoader::new(fx.graph());

        let report = fx
            .pipeline(vec![fx.root()], &["a.proto"])
            .dry_run(true)
            .run(&loader, &EchoTarget)
            .unwrap();

        assert_eq!(report.previews.len(), 1);
        assert!(report.emitted.is_empty());
        assert!(!fx.out.path().join("demo").exists());
    }

    #[test]
    fn test_check_stops_before_emit() {
        let fx = Fixture::new();
        let loader = StaticLoader::new(fx.graph());

        let report = fx.pipeline(vec![fx.root()], &["a.proto"]).check(&loader).unwrap();

        assert_eq!(report.emitted_files, [fx.location("a.proto")]);
        assert!(report.emitted.is_empty());
        assert!(!fx.out.path().join("demo").exists());
    }
}
