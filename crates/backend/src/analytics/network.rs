use std::collections::HashSet;

use contracts::domain::client::{Client, ClientId};
use contracts::domain::product::ProductId;
use contracts::reports::{ClientNetwork, NetworkEdge, NetworkNode};

/// Build the shared-purchases graph: clients are nodes, and an edge
/// connects two clients when they bought at least one common product.
/// Edge weight is the count of distinct shared products; the node's order
/// count serves as a size hint for rendering.
pub fn client_network(clients: &[Client]) -> ClientNetwork {
    let nodes: Vec<NetworkNode> = clients
        .iter()
        .map(|client| NetworkNode {
            client_id: client.id,
            label: client.name().to_string(),
            order_count: client.order_count(),
        })
        .collect();

    let baskets: Vec<(ClientId, HashSet<ProductId>)> = clients
        .iter()
        .map(|client| {
            let products: HashSet<ProductId> = client
                .orders()
                .iter()
                .flat_map(|order| order.items().iter().map(|item| item.product().id))
                .collect();
            (client.id, products)
        })
        .collect();

    let mut edges = Vec::new();
    for i in 0..baskets.len() {
        for j in (i + 1)..baskets.len() {
            let weight = baskets[i].1.intersection(&baskets[j].1).count();
            if weight > 0 {
                edges.push(NetworkEdge {
                    source: baskets[i].0,
                    target: baskets[j].0,
                    weight,
                });
            }
        }
    }

    ClientNetwork { nodes, edges }
}
