//! Power propagation from sources through conducting equipment.

use pb_model::{Connection, Equipment};
use tracing::debug;

use crate::network::ElectricalNetwork;

/// Energized flags computed for one diagram state.
///
/// `equipment[i]` and `connections[j]` line up with the slices the result
/// was computed from. Pipe connections are always `false` here and are left
/// untouched by [`Energization::apply`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Energization {
    pub equipment: Vec<bool>,
    pub connections: Vec<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    pub sources: usize,
    pub energized_equipment: usize,
    pub energized_connections: usize,
    pub dangling_connections: usize,
}

impl Energization {
    pub fn apply(&self, equipment: &mut [Equipment], connections: &mut [Connection]) {
        for (e, &on) in equipment.iter_mut().zip(&self.equipment) {
            e.is_energized = on;
        }
        for (c, &on) in connections.iter_mut().zip(&self.connections) {
            if c.is_electrical() {
                c.is_energized = on;
            }
        }
    }
}

/// Power leaves equipment that is a source or that conducts.
fn passes_power(e: &Equipment) -> bool {
    e.is_power_source() || e.can_conduct_electricity()
}

/// Equipment the walk continues into once power reaches it. Passive loads
/// (non-electrical types) are energized but never forward anything; an
/// electrical device that cannot pass power stops the walk un-energized.
fn accepts_power(e: &Equipment) -> bool {
    passes_power(e) || !e.equipment_type.is_electrically_relevant()
}

struct Frame {
    node: usize,
    next: usize,
}

/// Compute energization without mutating the diagram.
///
/// Sources are walked depth-first in collection order with one shared
/// visited set, so each equipment is entered at most once. An edge whose
/// far end was already visited is never energized from this side.
pub fn compute(equipment: &[Equipment], connections: &[Connection]) -> Energization {
    let network = ElectricalNetwork::build(equipment, connections);
    walk(&network, equipment, connections.len())
}

fn walk(network: &ElectricalNetwork, equipment: &[Equipment], connection_count: usize) -> Energization {
    let mut result = Energization {
        equipment: vec![false; equipment.len()],
        connections: vec![false; connection_count],
    };
    let mut visited = vec![false; equipment.len()];
    let mut stack: Vec<Frame> = Vec::new();

    for seed in 0..equipment.len() {
        if !equipment[seed].is_power_source() || visited[seed] {
            continue;
        }
        visited[seed] = true;
        result.equipment[seed] = true;
        stack.push(Frame { node: seed, next: 0 });

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let Some(edge) = network.edges_of(node).get(frame.next).copied() else {
                stack.pop();
                continue;
            };
            frame.next += 1;

            if visited[edge.other] || !passes_power(&equipment[node]) {
                continue;
            }
            result.connections[edge.connection] = true;
            visited[edge.other] = true;
            if accepts_power(&equipment[edge.other]) {
                result.equipment[edge.other] = true;
                stack.push(Frame {
                    node: edge.other,
                    next: 0,
                });
            }
        }
    }

    result
}

/// Recompute and write `is_energized` on every equipment and electrical
/// connection. Running it twice gives the same flags.
pub fn recalculate(equipment: &mut [Equipment], connections: &mut [Connection]) -> PropagationSummary {
    let network = ElectricalNetwork::build(equipment, connections);
    let result = walk(&network, equipment, connections.len());
    result.apply(equipment, connections);

    let summary = PropagationSummary {
        sources: equipment.iter().filter(|e| e.is_power_source()).count(),
        energized_equipment: result.equipment.iter().filter(|on| **on).count(),
        energized_connections: result.connections.iter().filter(|on| **on).count(),
        dangling_connections: network.dangling_connections(),
    };
    debug!(
        sources = summary.sources,
        energized_equipment = summary.energized_equipment,
        energized_connections = summary.energized_connections,
        dangling = summary.dangling_connections,
        "recalculated energization"
    );
    summary
}
