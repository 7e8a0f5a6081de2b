pub mod dto;

pub use dto::{
    ClientNetwork, ClientRanking, NetworkEdge, NetworkNode, ProductRanking, SalesSummary,
    TimeSeriesPoint,
};
