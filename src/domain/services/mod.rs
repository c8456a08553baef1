/// Boundary to the external face-recognition engine.
pub mod face_engine;
