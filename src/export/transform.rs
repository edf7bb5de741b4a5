//! World transform encoding.

use cgmath::Matrix4;

/// Flatten an object-to-world matrix into the 16-float row-major sequence
/// the runtime expects: element `[r * 4 + c]` is row `r`, column `c`.
///
/// cgmath stores matrices column-major, so this transposes the storage
/// order. The values themselves pass through bit-for-bit; no TRS
/// decomposition or normalization happens here.
pub fn encode_matrix(matrix: &Matrix4<f32>) -> [f32; 16] {
    let m: [[f32; 4]; 4] = (*matrix).into();
    let mut out = [0.0f32; 16];
    for row in 0..4 {
        for col in 0..4 {
            // `m[col][row]`: cgmath's outer index is the column.
            out[row * 4 + col] = m[col][row];
        }
    }
    out
}
