//! Dependency analysis: transitive closures, reverse lookups, install order.
//!
//! The dependency graph is implicit in each formula's `dependencies` list and
//! may contain cycles; every walk here carries a visited set and terminates
//! regardless. Reported lists are sorted so output does not depend on
//! traversal order.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashSet, VecDeque};

use crate::error::{Result, WortError};
use crate::formula::{Formula, FormulaRepository};

/// Transitive dependency closure of `roots`: every name reachable from a
/// root along declared dependency edges, deduplicated and sorted. Each root
/// is excluded from its own reachable set, so a root shows up only when
/// another root depends on it.
///
/// A root that does not resolve is an error. A declared dependency that does
/// not resolve mid-traversal stays in the report but contributes no further
/// edges. With `verbose` the skipped expansion is noted on stderr, otherwise
/// it leaves only a debug breadcrumb.
pub fn closure(
    repo: &dyn FormulaRepository,
    roots: &[String],
    verbose: bool,
) -> Result<Vec<String>> {
    let mut report = Vec::new();

    for root in roots {
        let formula = repo.resolve(root)?;

        // Reachability is tracked per root so one root's edge back to
        // another root still lists it.
        let mut visited: HashSet<String> = HashSet::from([root.clone()]);
        let mut queue: VecDeque<String> = formula.dependencies.iter().cloned().collect();

        while let Some(name) = queue.pop_front() {
            if !visited.insert(name.clone()) {
                continue;
            }
            report.push(name.clone());

            match repo.resolve(&name) {
                Ok(dep) => queue.extend(dep.dependencies.iter().cloned()),
                Err(WortError::UnknownFormula(_)) => {
                    if verbose {
                        eprintln!("Warning: {name} is declared as a dependency but unavailable");
                    } else {
                        tracing::debug!("skipping unavailable dependency {name}");
                    }
                }
                Err(other) => return Err(other),
            }
        }
    }

    report.sort();
    report.dedup();
    Ok(report)
}

/// The formulae that list `name` as a direct dependency. One level only:
/// dependents-of-dependents are deliberately not followed.
pub fn direct_dependents(repo: &dyn FormulaRepository, name: &str) -> Result<Vec<String>> {
    repo.resolve(name)?;
    let index = repo.used_by_index()?;
    let mut dependents = index.get(name).cloned().unwrap_or_default();
    dependents.sort();
    dependents.dedup();
    Ok(dependents)
}

/// Dependencies-first ordering of a closed set of formulae (Kahn's
/// algorithm), ties broken lexicographically so the order is stable. Edges
/// pointing outside the set are ignored; a cycle inside it is an error
/// naming the formulae still standing.
pub fn install_order(formulae: &[Formula]) -> Result<Vec<String>> {
    let members: HashSet<&str> = formulae.iter().map(|f| f.name.as_str()).collect();

    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for formula in formulae {
        in_degree.entry(formula.name.as_str()).or_insert(0);
        for dep in &formula.dependencies {
            if !members.contains(dep.as_str()) {
                continue;
            }
            dependents
                .entry(dep.as_str())
                .or_default()
                .push(formula.name.as_str());
            *in_degree.entry(formula.name.as_str()).or_insert(0) += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<&str>> = in_degree
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(name, _)| Reverse(*name))
        .collect();
    let mut order = Vec::new();

    while let Some(Reverse(name)) = ready.pop() {
        order.push(name.to_string());
        if let Some(users) = dependents.get(name) {
            for user in users {
                if let Some(count) = in_degree.get_mut(user) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(Reverse(*user));
                    }
                }
            }
        }
    }

    if order.len() != in_degree.len() {
        let ordered: HashSet<&str> = order.iter().map(String::as_str).collect();
        let mut stuck: Vec<&str> = in_degree
            .keys()
            .filter(|name| !ordered.contains(**name))
            .copied()
            .collect();
        stuck.sort_unstable();
        return Err(WortError::Execution(format!(
            "Circular dependency involving: {}",
            stuck.join(", ")
        )));
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MapRepo {
        formulae: BTreeMap<String, Formula>,
    }

    impl MapRepo {
        fn new(specs: &[(&str, &[&str])]) -> Self {
            let formulae = specs
                .iter()
                .map(|(name, deps)| {
                    (
                        name.to_string(),
                        Formula {
                            name: name.to_string(),
                            dependencies: deps.iter().map(|d| d.to_string()).collect(),
                            ..Default::default()
                        },
                    )
                })
                .collect();
            Self { formulae }
        }
    }

    impl FormulaRepository for MapRepo {
        fn resolve(&self, name: &str) -> Result<Formula> {
            self.formulae
                .get(name)
                .cloned()
                .ok_or_else(|| WortError::UnknownFormula(name.to_string()))
        }

        fn all_names(&self) -> Result<Vec<String>> {
            Ok(self.formulae.keys().cloned().collect())
        }

        fn used_by_index(&self) -> Result<BTreeMap<String, Vec<String>>> {
            let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for formula in self.formulae.values() {
                for dep in &formula.dependencies {
                    index
                        .entry(dep.clone())
                        .or_default()
                        .push(formula.name.clone());
                }
            }
            Ok(index)
        }
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_closure_is_transitive_sorted_and_excludes_roots() {
        let repo = MapRepo::new(&[
            ("wget", &["openssl", "libidn2"]),
            ("openssl", &["ca-certificates"]),
            ("libidn2", &["libunistring"]),
            ("ca-certificates", &[]),
            ("libunistring", &[]),
        ]);

        let deps = closure(&repo, &names(&["wget"]), false).unwrap();
        assert_eq!(
            deps,
            vec!["ca-certificates", "libidn2", "libunistring", "openssl"]
        );
    }

    #[test]
    fn test_shared_dependencies_are_listed_once() {
        let repo = MapRepo::new(&[
            ("a", &["common"]),
            ("b", &["common"]),
            ("common", &["base"]),
            ("base", &[]),
        ]);

        let deps = closure(&repo, &names(&["a", "b"]), false).unwrap();
        assert_eq!(deps, vec!["base", "common"]);
    }

    #[test]
    fn test_cycles_terminate() {
        let repo = MapRepo::new(&[("a", &["b"]), ("b", &["a"])]);
        let deps = closure(&repo, &names(&["a"]), false).unwrap();
        assert_eq!(deps, vec!["b"]);
    }

    #[test]
    fn test_self_dependency_terminates() {
        let repo = MapRepo::new(&[("narcissus", &["narcissus"])]);
        let deps = closure(&repo, &names(&["narcissus"]), false).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_unknown_root_is_an_error() {
        let repo = MapRepo::new(&[("a", &[])]);
        let err = closure(&repo, &names(&["missing"]), false).unwrap_err();
        match err {
            WortError::UnknownFormula(name) => assert_eq!(name, "missing"),
            other => panic!("expected UnknownFormula, got {other:?}"),
        }
    }

    #[test]
    fn test_unavailable_dependency_is_reported_but_not_expanded() {
        let repo = MapRepo::new(&[("a", &["ghost", "b"]), ("b", &[])]);
        let deps = closure(&repo, &names(&["a"]), false).unwrap();
        assert_eq!(deps, vec!["b", "ghost"]);
    }

    #[test]
    fn test_a_root_depended_on_by_another_root_is_reported() {
        let repo = MapRepo::new(&[("a", &["b"]), ("b", &["c"]), ("c", &[])]);
        let deps = closure(&repo, &names(&["a", "b"]), false).unwrap();
        assert_eq!(deps, vec!["b", "c"]);
    }

    #[test]
    fn test_mutually_dependent_roots_report_each_other() {
        let repo = MapRepo::new(&[("a", &["b"]), ("b", &["a"])]);
        let deps = closure(&repo, &names(&["a", "b"]), false).unwrap();
        assert_eq!(deps, vec!["a", "b"]);
    }

    #[test]
    fn test_dependents_are_direct_only() {
        // x -> y -> z: z is used by y alone, never transitively by x
        let repo = MapRepo::new(&[("x", &["y"]), ("y", &["z"]), ("z", &[])]);
        assert_eq!(direct_dependents(&repo, "z").unwrap(), vec!["y"]);
        assert_eq!(direct_dependents(&repo, "y").unwrap(), vec!["x"]);
        assert!(direct_dependents(&repo, "x").unwrap().is_empty());
    }

    #[test]
    fn test_dependents_of_unknown_formula_is_an_error() {
        let repo = MapRepo::new(&[("a", &[])]);
        assert!(matches!(
            direct_dependents(&repo, "missing"),
            Err(WortError::UnknownFormula(_))
        ));
    }

    #[test]
    fn test_install_order_puts_dependencies_first() {
        let repo = MapRepo::new(&[
            ("wget", &["openssl", "libidn2"]),
            ("openssl", &["ca-certificates"]),
            ("libidn2", &[]),
            ("ca-certificates", &[]),
        ]);
        let formulae: Vec<Formula> = ["wget", "openssl", "libidn2", "ca-certificates"]
            .iter()
            .map(|name| repo.resolve(name).unwrap())
            .collect();

        let order = install_order(&formulae).unwrap();
        let position = |name: &str| order.iter().position(|n| n == name).unwrap();
        assert!(position("ca-certificates") < position("openssl"));
        assert!(position("openssl") < position("wget"));
        assert!(position("libidn2") < position("wget"));
        // Lexicographic tie-break makes the full order reproducible
        assert_eq!(order[0], "ca-certificates");
        assert_eq!(order[1], "libidn2");
    }

    #[test]
    fn test_install_order_reports_cycles() {
        let formulae = vec![
            Formula {
                name: "a".to_string(),
                dependencies: vec!["b".to_string()],
                ..Default::default()
            },
            Formula {
                name: "b".to_string(),
                dependencies: vec!["a".to_string()],
                ..Default::default()
            },
            Formula {
                name: "free".to_string(),
                ..Default::default()
            },
        ];

        let err = install_order(&formulae).unwrap_err();
        match err {
            WortError::Execution(msg) => {
                assert!(msg.contains("a"));
                assert!(msg.contains("b"));
                assert!(!msg.contains("free"));
            }
            other => panic!("expected Execution, got {other:?}"),
        }
    }
}
