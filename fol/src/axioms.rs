// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Canonical premise sets for standard algebraic and categorical theories.
//!
//! Everything here is a pure function of its arguments; the generated
//! formulas are ordinary [`Formula`] values ready for the solver input
//! builders.

use crate::syntax::Formula;
use itertools::chain;

/// The axioms of a category: identity existence and uniqueness, composition
/// under matching source/target, associativity, and the identity laws.
pub fn category_axioms() -> Vec<Formula> {
    [
        // identity morphisms exist
        "all x (object(x) -> exists i (morphism(i) & source(i,x) & target(i,x) & identity(i,x)))",
        // identity is unique
        "all x all i1 all i2 ((identity(i1,x) & identity(i2,x)) -> i1 = i2)",
        // composition exists when source/target match
        "all f all g ((morphism(f) & morphism(g) & target(f) = source(g)) -> exists h (morphism(h) & compose(g,f,h)))",
        // composition is associative
        "all f all g all h all fg all gh all fgh all gfh ((compose(g,f,fg) & compose(h,g,gh) & compose(h,fg,fgh) & compose(gh,f,gfh)) -> fgh = gfh)",
        // left identity law
        "all f all a all id ((morphism(f) & source(f,a) & identity(id,a) & compose(f,id,comp)) -> comp = f)",
        // right identity law
        "all f all b all id ((morphism(f) & target(f,b) & identity(id,b) & compose(id,f,comp)) -> comp = f)",
    ]
    .into_iter()
    .map(Formula::from)
    .collect()
}

/// The functor laws for a functor with the given name (lowercased into the
/// predicate templates): preservation of identities and of composition.
pub fn functor_axioms(functor: &str) -> Vec<Formula> {
    let f = functor.to_lowercase();
    vec![
        Formula::new(format!(
            "all x all id (identity(id,x) -> identity({f}(id), {f}(x)))"
        )),
        Formula::new(format!(
            "all g all h all gh ((compose(g,h,gh)) -> compose({f}(g), {f}(h), {f}(gh)))"
        )),
    ]
}

/// The naturality condition for a natural transformation `component` between
/// two named functors: for every morphism `m: a -> b`,
/// `G(m) . component_a = component_b . F(m)`.
pub fn naturality_condition(functor_f: &str, functor_g: &str, component: &str) -> Vec<Formula> {
    let f = functor_f.to_lowercase();
    let g = functor_g.to_lowercase();
    vec![Formula::new(format!(
        "all morph all a all b ((morphism(morph) & source(morph,a) & target(morph,b)) -> \
         exists comp1 exists comp2 (compose({g}(morph), {component}(a), comp1) & \
         compose({component}(b), {f}(morph), comp2) & comp1 = comp2))"
    ))]
}

/// Monoid axioms: closure, associativity, and a two-sided identity, over a
/// ternary `mult` relation.
pub fn monoid_axioms() -> Vec<Formula> {
    [
        // closure
        "all x all y exists z (mult(x,y,z))",
        // associativity
        "all x all y all z all xy all yz all xyz all xyz2 ((mult(x,y,xy) & mult(y,z,yz) & mult(xy,z,xyz) & mult(x,yz,xyz2)) -> xyz = xyz2)",
        // identity exists
        "exists e (all x (mult(e,x,x) & mult(x,e,x)))",
    ]
    .into_iter()
    .map(Formula::from)
    .collect()
}

/// Group axioms: the monoid axioms (unchanged, in order) plus inverse
/// existence with respect to the identity constant `e`.
pub fn group_axioms() -> Vec<Formula> {
    let mut axioms = monoid_axioms();
    axioms.push(Formula::new("all x exists y (mult(x,y,e) & mult(y,x,e))"));
    axioms
}

/// Premises and conclusion asserting that two morphism paths with common
/// endpoints compose to equal morphisms (the diagram commutes).
///
/// Each path is an ordered list of morphism names applied left to right.
/// Intermediate composition results get deterministic per-path names that
/// are guaranteed not to collide with any morphism name in either path.
pub fn commuting_diagram(
    path_a: &[&str],
    path_b: &[&str],
    start: &str,
    end: &str,
) -> (Vec<Formula>, Formula) {
    let mut premises: Vec<Formula> = chain(
        path_premises(path_a, start, end),
        path_premises(path_b, start, end),
    )
    .collect();

    let base_a = fresh_base("via_a", path_a, path_b);
    let base_b = fresh_base("via_b", path_a, path_b);
    let (comp_a, result_a) = compose_path(path_a, &base_a);
    let (comp_b, result_b) = compose_path(path_b, &base_b);
    premises.extend(comp_a);
    premises.extend(comp_b);

    let conclusion = Formula::new(format!("{result_a} = {result_b}"));
    (premises, conclusion)
}

fn path_premises(path: &[&str], start: &str, end: &str) -> Vec<Formula> {
    let mut premises = Vec::new();
    for (i, morph) in path.iter().enumerate() {
        premises.push(Formula::new(format!("morphism({morph})")));
        if i == 0 {
            premises.push(Formula::new(format!("source({morph}, {start})")));
        }
        if i == path.len() - 1 {
            premises.push(Formula::new(format!("target({morph}, {end})")));
        }
    }
    premises
}

/// Pick a name for composition results that no morphism in either path uses,
/// directly or as a `base_<i>` step name.
fn fresh_base(base: &str, path_a: &[&str], path_b: &[&str]) -> String {
    let mut base = base.to_string();
    let collides = |candidate: &str| {
        let step_prefix = format!("{candidate}_");
        chain(path_a, path_b).any(|m| *m == candidate || m.starts_with(&step_prefix))
    };
    while collides(&base) {
        base.push('_');
    }
    base
}

/// Chain binary compositions along `path`, naming each intermediate result
/// `{base}_{i}` and the final one `base`. A single-morphism path composes to
/// itself with no premises.
fn compose_path(path: &[&str], base: &str) -> (Vec<Formula>, String) {
    if path.len() <= 1 {
        let result = path.first().map_or_else(|| base.to_string(), |m| m.to_string());
        return (Vec::new(), result);
    }
    let mut premises = Vec::new();
    let mut current = path[0].to_string();
    for (i, morph) in path.iter().enumerate().skip(1) {
        let name = if i < path.len() - 1 {
            format!("{base}_{i}")
        } else {
            base.to_string()
        };
        premises.push(Formula::new(format!("compose({morph}, {current}, {name})")));
        current = name;
    }
    (premises, current)
}
