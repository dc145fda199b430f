use std::collections::HashSet;

use super::types::GraphEdge;

/// Sorted-pair key identifying an undirected connection regardless of the
/// direction it was reported in.
pub fn canonical_key(from: &str, to: &str) -> String {
	if from <= to {
		format!("{from}|{to}")
	} else {
		format!("{to}|{from}")
	}
}

/// Reduce a raw, possibly-redundant edge list to the renderable graph.
///
/// Keeps only edges whose endpoints are both in `visible` (the backing list
/// may reference far more stations than are loaded), then drops duplicate
/// undirected pairs. The first edge seen per canonical key wins; when the
/// service reports different costs for the two directions this tie-break is
/// arbitrary but deterministic given the input order. Output preserves the
/// insertion order of first-seen keys.
pub fn assemble(edges: Vec<GraphEdge>, visible: &HashSet<String>) -> Vec<GraphEdge> {
	let mut seen = HashSet::new();
	edges
		.into_iter()
		.filter(|edge| visible.contains(&edge.from) && visible.contains(&edge.to))
		.filter(|edge| seen.insert(canonical_key(&edge.from, &edge.to)))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mk_edge(from: &str, to: &str, cost: f64) -> GraphEdge {
		GraphEdge {
			from: from.to_string(),
			to: to.to_string(),
			cost,
		}
	}

	fn visible(names: &[&str]) -> HashSet<String> {
		names.iter().map(|n| n.to_string()).collect()
	}

	#[test]
	fn filters_then_dedups_the_sample_graph() {
		let edges = vec![mk_edge("A", "B", 1.0), mk_edge("B", "A", 1.0), mk_edge("B", "C", 2.0)];
		let out = assemble(edges, &visible(&["A", "B", "C"]));

		assert_eq!(out.len(), 2);
		assert_eq!(canonical_key(&out[0].from, &out[0].to), "A|B");
		assert_eq!(canonical_key(&out[1].from, &out[1].to), "B|C");
	}

	#[test]
	fn drops_edges_touching_hidden_stations() {
		let edges = vec![mk_edge("A", "B", 1.0), mk_edge("A", "Z", 4.0), mk_edge("Z", "Q", 1.0)];
		let out = assemble(edges, &visible(&["A", "B"]));

		assert_eq!(out, vec![mk_edge("A", "B", 1.0)]);
		for edge in &out {
			assert!(edge.from == "A" || edge.from == "B");
			assert!(edge.to == "A" || edge.to == "B");
		}
	}

	#[test]
	fn exactly_one_of_a_reversed_pair_survives() {
		let v = visible(&["A", "B"]);
		let out = assemble(vec![mk_edge("B", "A", 3.0), mk_edge("A", "B", 3.0)], &v);

		assert_eq!(out.len(), 1);
		// insertion order decides the winner
		assert_eq!(out[0], mk_edge("B", "A", 3.0));
	}

	#[test]
	fn first_seen_cost_wins_on_mismatched_duplicates() {
		let v = visible(&["A", "B"]);
		let out = assemble(vec![mk_edge("A", "B", 1.0), mk_edge("B", "A", 9.0)], &v);

		assert_eq!(out, vec![mk_edge("A", "B", 1.0)]);
	}

	#[test]
	fn assembling_twice_is_a_fixed_point() {
		let v = visible(&["A", "B", "C", "D"]);
		let edges = vec![
			mk_edge("A", "B", 1.0),
			mk_edge("B", "A", 1.0),
			mk_edge("C", "B", 2.0),
			mk_edge("C", "D", 5.0),
			mk_edge("D", "C", 5.0),
		];

		let once = assemble(edges, &v);
		let twice = assemble(once.clone(), &v);
		assert_eq!(once, twice);
	}

	#[test]
	fn empty_input_yields_empty_output() {
		assert!(assemble(Vec::new(), &visible(&["A"])).is_empty());
		assert!(assemble(vec![mk_edge("A", "B", 1.0)], &HashSet::new()).is_empty());
	}

	#[test]
	fn output_order_follows_first_appearance() {
		let v = visible(&["A", "B", "C"]);
		let out = assemble(
			vec![mk_edge("C", "B", 2.0), mk_edge("A", "B", 1.0), mk_edge("B", "C", 2.0)],
			&v,
		);

		assert_eq!(out.len(), 2);
		assert_eq!((out[0].from.as_str(), out[0].to.as_str()), ("C", "B"));
		assert_eq!((out[1].from.as_str(), out[1].to.as_str()), ("A", "B"));
	}
}
