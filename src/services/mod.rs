/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// NFT minting, equipping and inventory reads.
pub mod inventory_service;
/// Score submission, rankings and weekly payouts.
pub mod leaderboard_service;
/// Player document reads and merges.
pub mod player_service;
