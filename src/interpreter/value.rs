/// The runtime `Value` enum, truthiness and canonical formatting.
pub mod core;
/// The declared-type lattice used for gradual typing.
///
/// Declared types are attached to variables, parameters and return values and
/// are enforced on every write. See `evaluator::types` for the rules.
pub mod declared_type;
