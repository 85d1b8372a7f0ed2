//! Sinusoidal positional encodings as in Vaswani et al.,
//! PE(pos, 2i) = sin(pos / 10000^(2i/d)), PE(pos, 2i+1) = cos(pos / 10000^(2i/d)),
//! plus the pairwise dot-product similarity the figures illustrate.

use crate::math::Matrix;
use std::f32::consts::PI;

/// Encoding value for a single position and dimension.
///
/// Dimensions come in sin/cos pairs: even `i` selects the sine channel,
/// odd `i` the cosine channel at the same frequency. `d_model` may be any
/// positive integer, not only a power of two.
pub fn encoding_value(pos: usize, i: usize, d_model: usize) -> f32 {
    let pair = i / 2;
    let angle = pos as f32 / 10000f32.powf((2 * pair) as f32 / d_model as f32);
    if i % 2 == 0 {
        angle.sin()
    } else {
        angle.cos()
    }
}

/// Full encoding matrix, indexed `[position][dimension]`.
/// Runs in O(`max_position` * `d_model`).
pub fn encoding_matrix(max_position: usize, d_model: usize) -> Matrix {
    let mut enc = Matrix::zeros(max_position, d_model);
    for pos in 0..max_position {
        for i in 0..d_model {
            enc.set(pos, i, encoding_value(pos, i, d_model));
        }
    }
    enc
}

/// Number of positions before the sinusoid at dimension `i` repeats.
/// Non-decreasing in `i` for fixed `d_model`.
pub fn wavelength(i: usize, d_model: usize) -> f32 {
    2.0 * PI * 10000f32.powf((2 * (i / 2)) as f32 / d_model as f32)
}

/// Dot product between the encodings of two positions.
///
/// Symmetric in its position arguments and maximal when they coincide;
/// the decay as positions drift apart is the property the similarity
/// figures exist to show.
pub fn dot_product(pos1: usize, pos2: usize, d_model: usize) -> f32 {
    let mut sum = 0.0;
    for i in 0..d_model {
        sum += encoding_value(pos1, i, d_model) * encoding_value(pos2, i, d_model);
    }
    sum
}

/// Pairwise similarity matrix over all positions, symmetric by
/// construction. Runs in O(`max_position`^2 * `d_model`).
pub fn similarity_matrix(max_position: usize, d_model: usize) -> Matrix {
    let mut sim = Matrix::zeros(max_position, max_position);
    for i in 0..max_position {
        for j in 0..max_position {
            sim.set(i, j, dot_product(i, j, d_model));
        }
    }
    sim
}
