//! Restrict a type graph to the types reachable from include rules, minus
//! the types matching exclude rules.
//!
//! A rule names a type or a package. With an optional trailing `.*`
//! stripped, rule `r` matches a type whose fully qualified name is `r` or
//! starts with `r.`, so a rule naming a type also covers its nested types
//! and a rule naming a package also covers its sub-packages.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::IndexSet;
use wiregen_schema::{ProtoFile, ProtoType, TypeGraph};

/// Include and exclude identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    includes: IndexSet<String>,
    excludes: IndexSet<String>,
}

impl RuleSet {
    pub fn new<I, E>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn include(mut self, rule: impl Into<String>) -> Self {
        self.includes.insert(rule.into());
        self
    }

    pub fn exclude(mut self, rule: impl Into<String>) -> Self {
        self.excludes.insert(rule.into());
        self
    }

    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(String::as_str)
    }

    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(String::as_str)
    }

    /// A rule set with no rules leaves graphs untouched.
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

/// Outcome of a prune, alongside the pruned graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Include rules that matched no type.
    pub unused_includes: Vec<String>,
    /// Exclude rules that matched no type.
    pub unused_excludes: Vec<String>,
    pub types_before: usize,
    pub types_after: usize,
}

impl PruneReport {
    pub fn has_unused_rules(&self) -> bool {
        !self.unused_includes.is_empty() || !self.unused_excludes.is_empty()
    }
}

/// Whether `rule` matches the type named `name`.
pub fn rule_matches(rule: &str, name: &str) -> bool {
    let prefix = rule.strip_suffix(".*").unwrap_or(rule);
    match name.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Prune `graph` with `rules`.
///
/// An empty rule set returns an equal graph. Otherwise the roots are the
/// types matching an include rule (every type when there are no include
/// rules); the result holds the closure of the roots over field references
/// and nested types, minus every type matching an exclude rule. Enclosing
/// types of a kept nested type stay in the graph as empty containers.
/// Fields that reference a type outside the result are removed. Files left
/// without types are dropped.
pub fn prune(rules: &RuleSet, graph: &TypeGraph) -> (TypeGraph, PruneReport) {
    let types_before = graph.type_count();
    if rules.is_empty() {
        let report = PruneReport {
            types_before,
            types_after: types_before,
            ..PruneReport::default()
        };
        return (graph.clone(), report);
    }

    let unused = |rule: &&str| !graph.types().any(|ty| rule_matches(rule, &ty.name));
    let unused_includes = rules.includes().filter(unused).map(String::from).collect();
    let unused_excludes = rules.excludes().filter(unused).map(String::from).collect();

    let index: HashMap<&str, &ProtoType> = graph.types().map(|ty| (ty.name.as_str(), ty)).collect();
    let roots: Vec<&str> = if rules.includes.is_empty() {
        graph.types().map(|ty| ty.name.as_str()).collect()
    } else {
        graph
            .types()
            .filter(|ty| rules.includes().any(|rule| rule_matches(rule, &ty.name)))
            .map(|ty| ty.name.as_str())
            .collect()
    };

    let mut reachable: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = roots.into();
    while let Some(name) = queue.pop_front() {
        if !reachable.insert(name) {
            continue;
        }
        if let Some(&ty) = index.get(name) {
            queue.extend(ty.references());
            queue.extend(ty.nested.iter().map(|nested| nested.name.as_str()));
        }
    }
    reachable.retain(|name| !rules.excludes().any(|rule| rule_matches(rule, name)));

    let files: Vec<ProtoFile> = graph
        .files()
        .iter()
        .filter_map(|file| {
            let types: Vec<ProtoType> = file
                .types
                .iter()
                .filter_map(|ty| retain(ty, &reachable))
                .collect();
            (!types.is_empty()).then(|| ProtoFile {
                location: file.location.clone(),
                package: file.package.clone(),
                imports: file.imports.clone(),
                types,
            })
        })
        .collect();

    let pruned = TypeGraph::new(files);
    let report = PruneReport {
        unused_includes,
        unused_excludes,
        types_before,
        types_after: pruned.type_count(),
    };
    (pruned, report)
}

fn retain(ty: &ProtoType, keep: &HashSet<&str>) -> Option<ProtoType> {
    let nested: Vec<ProtoType> = ty.nested.iter().filter_map(|n| retain(n, keep)).collect();

    if keep.contains(ty.name.as_str()) {
        let mut kept = ty.clone();
        kept.fields
            .retain(|field| field.ty.named().is_none_or(|name| keep.contains(name)));
        kept.nested = nested;
        Some(kept)
    } else if nested.is_empty() {
        None
    } else {
        let mut container = ProtoType::new(ty.name.clone(), ty.package.clone(), ty.kind, ty.location.clone());
        container.nested = nested;
        Some(container)
    }
}
