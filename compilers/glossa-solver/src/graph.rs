use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use glossa_protocol::{Determiner, DeterminerConfig, DeterminerSlot};
use std::collections::HashMap;

/// Why two determiner values cannot share a noun phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusion {
    pub reason: &'static str,
}

/// Undirected conflict graph over every determiner value. An edge between
/// two values means they may never be committed together.
pub struct ExclusivityGraph {
    graph: UnGraph<Determiner, Exclusion>,
    index_map: HashMap<Determiner, NodeIndex>,
}

impl ExclusivityGraph {
    pub fn new() -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut index_map = HashMap::new();
        for &value in Determiner::ALL {
            index_map.insert(value, graph.add_node(value));
        }
        Self { graph, index_map }
    }

    pub fn forbid(&mut self, a: Determiner, b: Determiner, reason: &'static str) {
        if self.conflict(a, b).is_some() {
            return;
        }
        let (ia, ib) = (self.index_map[&a], self.index_map[&b]);
        self.graph.add_edge(ia, ib, Exclusion { reason });
    }

    fn forbid_all(&mut self, left: &[Determiner], right: &[Determiner], reason: &'static str) {
        for &a in left {
            for &b in right {
                self.forbid(a, b, reason);
            }
        }
    }

    pub fn conflict(&self, a: Determiner, b: Determiner) -> Option<Exclusion> {
        let (ia, ib) = (*self.index_map.get(&a)?, *self.index_map.get(&b)?);
        self.graph.find_edge(ia, ib).map(|edge| self.graph[edge])
    }

    /// All values excluded by `value`, with the reason for each.
    pub fn excluded_by(&self, value: Determiner) -> Vec<(Determiner, Exclusion)> {
        let Some(&idx) = self.index_map.get(&value) else {
            return Vec::new();
        };
        self.graph
            .edges(idx)
            .map(|edge| {
                let other = if edge.source() == idx { edge.target() } else { edge.source() };
                (self.graph[other], *edge.weight())
            })
            .collect()
    }

    /// First committed value in another slot that conflicts with `value`.
    pub fn first_conflict(
        &self,
        value: Determiner,
        selections: &DeterminerConfig,
    ) -> Option<(DeterminerSlot, Determiner, Exclusion)> {
        DeterminerSlot::ALL
            .into_iter()
            .filter(|slot| *slot != value.slot())
            .find_map(|slot| {
                let other = selections.get(slot)?;
                self.conflict(value, other).map(|exclusion| (slot, other, exclusion))
            })
    }

    /// The fixed co-occurrence table of the noun-phrase editor.
    pub fn standard() -> Self {
        use Determiner::*;

        let mut table = Self::new();

        let singular_central = [A, This, That, Every, Each, Either, Neither];
        let quantifier_central = [Every, Each, Any, Some, No, Either, Neither];
        let possessive: Vec<Determiner> = Determiner::ALL.iter().copied().filter(Determiner::is_possessive).collect();
        let pre = [All, Both, Half];
        let plural_post = [Two, Three, Many, Few, Several];

        // Number agreement with the plural/uncountable marker
        table.forbid_all(&singular_central, &[Plural], "takes a singular noun");
        table.forbid_all(&[A, Every, Each, Either, Neither, One], &[Uncountable], "needs a countable noun");
        table.forbid_all(&[These, Those], &[Uncountable], "needs a countable plural noun");
        table.forbid_all(&plural_post, &[Uncountable], "counts countable nouns only");
        table.forbid_all(&[One, Much, Little], &[Plural], "takes a singular noun");

        // Demonstratives fix the number of the phrase
        table.forbid_all(&[This, That], &plural_post, "this/that take a singular noun");
        table.forbid_all(&[These, Those], &[One, Much, Little], "these/those take a plural noun");

        // Central quantifiers and possessives exclude a predeterminer
        table.forbid_all(&possessive, &pre, "a possessive excludes a predeterminer quantifier");
        table.forbid_all(&quantifier_central, &pre, "two quantifiers cannot be stacked");
        table.forbid_all(&[A], &[All, Both], "all/both cannot precede the indefinite article");
        table.forbid_all(&[Both], &[This, That, One, Three, Much, Little, Uncountable], "both refers to exactly two");

        // Post quantifiers that clash with a central choice
        table.forbid_all(&[Each, Either, Neither], &plural_post, "takes a single item");
        table.forbid_all(&[A], &[Two, Three, Many, Several, Much], "the indefinite article takes one item");
        table.forbid_all(&[Every, Each, These, Those], &[Much, Little], "much/little need an uncountable noun");

        table
    }
}

impl Default for ExclusivityGraph {
    fn default() -> Self {
        Self::standard()
    }
}
