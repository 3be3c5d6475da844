//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use base64::Engine;

/// Minimal embedded glTF: `hips` → `spine`, with one animation holding a
/// rotation channel (LINEAR) and a translation channel (STEP) on the hips.
///
/// The hips rotate from identity to 90° about +Y over one second.
pub fn gltf_fixture(hips: &str, spine: &str) -> Vec<u8> {
    let mut buffer = Vec::new();
    for t in [0.0_f32, 1.0] {
        buffer.extend_from_slice(&t.to_le_bytes());
    }
    let half = std::f32::consts::FRAC_1_SQRT_2;
    for v in [0.0_f32, 0.0, 0.0, 1.0, 0.0, half, 0.0, half] {
        buffer.extend_from_slice(&v.to_le_bytes());
    }
    for v in [0.0_f32, 1.0, 0.0, 0.0, 1.1, 0.0] {
        buffer.extend_from_slice(&v.to_le_bytes());
    }
    let data = base64::engine::general_purpose::STANDARD.encode(&buffer);

    format!(
        r#"{{
        "asset": {{ "version": "2.0" }},
        "scene": 0,
        "scenes": [{{ "name": "avatar", "nodes": [0] }}],
        "nodes": [
            {{ "name": "{hips}", "children": [1], "translation": [0.0, 1.0, 0.0] }},
            {{ "name": "{spine}" }}
        ],
        "buffers": [{{ "byteLength": {len}, "uri": "data:application/octet-stream;base64,{data}" }}],
        "bufferViews": [
            {{ "buffer": 0, "byteOffset": 0, "byteLength": 8 }},
            {{ "buffer": 0, "byteOffset": 8, "byteLength": 32 }},
            {{ "buffer": 0, "byteOffset": 40, "byteLength": 24 }}
        ],
        "accessors": [
            {{ "bufferView": 0, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.0] }},
            {{ "bufferView": 1, "componentType": 5126, "count": 2, "type": "VEC4" }},
            {{ "bufferView": 2, "componentType": 5126, "count": 2, "type": "VEC3" }}
        ],
        "animations": [{{
            "name": "mixamo.com",
            "samplers": [
                {{ "input": 0, "output": 1, "interpolation": "LINEAR" }},
                {{ "input": 0, "output": 2, "interpolation": "STEP" }}
            ],
            "channels": [
                {{ "sampler": 0, "target": {{ "node": 0, "path": "rotation" }} }},
                {{ "sampler": 1, "target": {{ "node": 0, "path": "translation" }} }}
            ]
        }}]
    }}"#,
        len = buffer.len(),
    )
    .into_bytes()
}

/// three.js clip JSON rotating `mixamorigHips` about +Y by `angle` radians
/// over `duration` seconds, plus a root-motion position track.
pub fn mixamo_clip_json(name: &str, angle: f32, duration: f32) -> String {
    let (s, c) = (angle * 0.5).sin_cos();
    format!(
        r#"{{
        "name": "{name}",
        "duration": {duration},
        "tracks": [
            {{ "name": "mixamorigHips.position", "type": "vector",
               "times": [0, {duration}], "values": [0, 90, 0, 0, 95, 0] }},
            {{ "name": "mixamorigHips.quaternion", "type": "quaternion",
               "times": [0, {duration}], "values": [0, 0, 0, 1, 0, {s}, 0, {c}] }}
        ]
    }}"#
    )
}

/// Routes library logs through the test harness; `RUST_LOG` selects the level.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
