use pb_core::new_id;
use pb_geometry::update_connection_endpoints;
use pb_model::{Connection, ConnectionType, RoutingMode};
use tracing::{debug, info, warn};

use super::DiagramController;
use crate::commands;
use crate::diagram::{Entity, EntityKind};

impl DiagramController {
    /// Connect two distinct existing equipment. Returns the new id, or
    /// `None` for self-connections and unknown endpoints.
    pub fn create_connection(
        &mut self,
        source: &str,
        target: &str,
        connection_type: ConnectionType,
        source_anchor: &str,
        target_anchor: &str,
    ) -> Option<String> {
        if source == target {
            warn!(%source, "refusing to connect equipment to itself");
            return None;
        }
        let (Some(from), Some(to)) = (self.diagram.equipment(source), self.diagram.equipment(target))
        else {
            warn!(%source, %target, "connection endpoint does not exist");
            return None;
        };

        let id = new_id();
        let mut connection = Connection::new(id.clone(), source, target, connection_type);
        connection.source_anchor = source_anchor.to_string();
        connection.target_anchor = target_anchor.to_string();
        connection.layer_id = self.active_layer.clone();
        update_connection_endpoints(&mut connection, from, to);

        let index = self.diagram.connections.len();
        self.diagram.connections.push(connection.clone());
        info!(%id, %source, %target, kind = %connection_type, "connection created");
        self.record(commands::inserted(
            format!("Connect {connection_type}"),
            index,
            Entity::Connection(connection),
        ));
        Some(id)
    }

    pub fn set_connection_routing(&mut self, id: &str, routing: RoutingMode) -> bool {
        let Some(before) = self.diagram.connection(id).cloned() else {
            debug!(%id, "no such connection");
            return false;
        };
        if before.routing == routing {
            return true;
        }
        let mut after = before.clone();
        after.routing = routing;
        self.diagram.replace_entity(Entity::Connection(after.clone()));
        self.record(commands::replaced(
            "Change routing",
            Entity::Connection(before),
            Entity::Connection(after),
        ));
        true
    }

    pub fn delete_connection(&mut self, id: &str) -> bool {
        let Some((index, entity)) = self.diagram.remove_entity(EntityKind::Connection, id) else {
            debug!(%id, "no such connection");
            return false;
        };
        self.record(commands::removed("Delete connection", index, entity));
        true
    }
}
