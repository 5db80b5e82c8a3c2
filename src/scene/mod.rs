/// MovingAI grid maps.
pub mod map;
/// MAPF solutions (per-timestep configurations).
pub mod solution;
