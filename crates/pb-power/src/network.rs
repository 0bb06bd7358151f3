//! Adjacency index over electrical connections.

use std::collections::HashMap;

use pb_model::{Connection, Equipment};

/// One incident electrical connection, seen from one of its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Index into the connection slice.
    pub connection: usize,
    /// Index into the equipment slice of the opposite endpoint.
    pub other: usize,
}

/// Electrical connectivity of a diagram.
///
/// Adjacency is stored as an offset table plus one flat edge list: the edges
/// of equipment `i` are `edges[offsets[i]..offsets[i + 1]]`, in connection
/// order. Connections whose endpoints do not resolve are left out and
/// counted as dangling.
#[derive(Clone, Debug, Default)]
pub struct ElectricalNetwork {
    offsets: Vec<usize>,
    edges: Vec<Edge>,
    connection_count: usize,
    dangling: usize,
}

impl ElectricalNetwork {
    pub fn build(equipment: &[Equipment], connections: &[Connection]) -> Self {
        // First occurrence wins for duplicate ids.
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(equipment.len());
        for (i, e) in equipment.iter().enumerate() {
            index.entry(e.id.as_str()).or_insert(i);
        }

        let mut resolved = Vec::new();
        let mut dangling = 0;
        for (ci, conn) in connections.iter().enumerate() {
            if !conn.is_electrical() {
                continue;
            }
            let source = index.get(conn.source_equipment_id.as_str());
            let target = index.get(conn.target_equipment_id.as_str());
            match (source, target) {
                (Some(&s), Some(&t)) => resolved.push((ci, s, t)),
                _ => dangling += 1,
            }
        }

        let mut degree = vec![0usize; equipment.len()];
        for &(_, s, t) in &resolved {
            degree[s] += 1;
            degree[t] += 1;
        }

        let mut offsets = Vec::with_capacity(equipment.len() + 1);
        offsets.push(0);
        for d in &degree {
            let last = offsets.last().copied().unwrap_or(0);
            offsets.push(last + d);
        }

        let mut cursor = offsets[..equipment.len()].to_vec();
        let mut edges = vec![
            Edge {
                connection: 0,
                other: 0
            };
            offsets[equipment.len()]
        ];
        for &(ci, s, t) in &resolved {
            edges[cursor[s]] = Edge {
                connection: ci,
                other: t,
            };
            cursor[s] += 1;
            edges[cursor[t]] = Edge {
                connection: ci,
                other: s,
            };
            cursor[t] += 1;
        }

        Self {
            offsets,
            edges,
            connection_count: connections.len(),
            dangling,
        }
    }

    /// Electrical connections incident to equipment `node`.
    pub fn edges_of(&self, node: usize) -> &[Edge] {
        match (self.offsets.get(node), self.offsets.get(node + 1)) {
            (Some(&start), Some(&end)) => &self.edges[start..end],
            _ => &[],
        }
    }

    pub fn equipment_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    pub fn dangling_connections(&self) -> usize {
        self.dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_model::{ConnectionType, EquipmentType};

    fn items(ids: &[&str]) -> Vec<Equipment> {
        ids.iter()
            .map(|id| Equipment::new(*id, *id, EquipmentType::Junction))
            .collect()
    }

    #[test]
    fn adjacency_in_connection_order() {
        let equipment = items(&["a", "b", "c"]);
        let connections = vec![
            Connection::new("c1", "a", "b", ConnectionType::Electrical),
            Connection::new("c2", "c", "a", ConnectionType::Electrical),
            Connection::new("p1", "a", "c", ConnectionType::Pipe),
        ];
        let net = ElectricalNetwork::build(&equipment, &connections);

        assert_eq!(net.equipment_count(), 3);
        assert_eq!(
            net.edges_of(0),
            &[
                Edge {
                    connection: 0,
                    other: 1
                },
                Edge {
                    connection: 1,
                    other: 2
                }
            ]
        );
        assert_eq!(net.edges_of(1).len(), 1);
        assert_eq!(net.edges_of(2).len(), 1);
        assert!(net.edges_of(7).is_empty());
    }

    #[test]
    fn dangling_connections_are_counted_not_indexed() {
        let equipment = items(&["a"]);
        let connections = vec![Connection::new(
            "c1",
            "a",
            "gone",
            ConnectionType::Electrical,
        )];
        let net = ElectricalNetwork::build(&equipment, &connections);
        assert_eq!(net.dangling_connections(), 1);
        assert!(net.edges_of(0).is_empty());
    }
}
