//! Criterion benchmarks for the pipeline's hot derivations.
//! See the `benches/` directory.
