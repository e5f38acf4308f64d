//! Random primitives shared by the marker strategies.

pub mod files;
pub mod lines;

use rand::{Rng, RngCore};

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

/// Uniform integer in `[min, max)`; `min` when the range is empty.
pub fn random_int(rng: &mut dyn RngCore, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.random_range(min..max)
}

/// Uniform float in `[min, max)`; `min` when the range is empty.
pub fn random_float(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    rng.random_range(min..max)
}

/// Length in `[min, max]`.
pub fn random_len(rng: &mut dyn RngCore, min: usize, max: usize) -> usize {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

pub fn random_char(rng: &mut dyn RngCore, alphabet: &[u8]) -> char {
    char::from(alphabet[rng.random_range(0..alphabet.len())])
}

/// Lower-case letters with a length in `[min_len, max_len]`.
pub fn random_letters(rng: &mut dyn RngCore, min_len: usize, max_len: usize) -> String {
    let len = random_len(rng, min_len, max_len);
    (0..len).map(|_| random_char(rng, LOWERCASE)).collect()
}

pub fn random_digits(rng: &mut dyn RngCore, len: usize) -> String {
    (0..len).map(|_| random_char(rng, DIGITS)).collect()
}

/// Number in `[min, max]`, left-padded with zeros to `width`.
pub fn padded_number(rng: &mut dyn RngCore, min: u64, max: u64, width: usize) -> String {
    let value = if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    };
    format!("{value:0width$}")
}

pub fn pick<'a, T>(rng: &mut dyn RngCore, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len()))
}

/// Source text for the `text` domain.
pub const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Sed non risus. Suspendisse lectus tortor, dignissim sit amet, adipiscing nec, ultricies sed, dolor. \
Cras elementum ultrices diam. Maecenas ligula massa, varius a, semper congue, euismod non, mi. \
Proin porttitor, orci nec nonummy molestie, enim est eleifend mi, non fermentum diam nisl sit amet erat. \
Duis semper. Duis arcu massa, scelerisque vitae, consequat in, pretium a, enim. \
Pellentesque congue. Ut in risus volutpat libero pharetra tempor. Cras vestibulum bibendum augue. \
Praesent egestas leo in pede. Praesent blandit odio eu enim. Pellentesque sed dui ut augue blandit sodales. \
Vestibulum ante ipsum primis in faucibus orci luctus et ultrices posuere cubilia Curae; \
Aliquam nibh. Mauris ac mauris sed pede pellentesque fermentum. Maecenas adipiscing ante non diam sodales hendrerit. \
Ut velit mauris, egestas sed, gravida nec, ornare ut, mi. Aenean ut orci vel massa suscipit pulvinar. \
Nulla sollicitudin. Fusce varius, ligula non tempus aliquam, nunc turpis ullamcorper nibh, in tempus sapien eros vitae ligula. \
Pellentesque rhoncus nunc et augue. Integer id felis. Curabitur aliquet pellentesque diam. \
Integer quis metus vitae elit lobortis egestas. Lorem ipsum dolor sit amet, consectetuer adipiscing elit. \
Morbi vel erat non mauris convallis vehicula. Nulla et sapien. Integer tortor tellus, aliquam faucibus, \
convallis id, congue eu, quam. Mauris ullamcorper felis vitae erat. Proin feugiat, augue non elementum posuere, \
metus purus iaculis lectus, et tristique ligula justo vitae magna. Aliquam convallis sollicitudin purus. \
Praesent aliquam, enim at fermentum mollis, ligula massa adipiscing nisl, ac euismod nibh nisl eu lectus. \
Fusce vulputate sem at sapien. Vivamus leo. Aliquam euismod libero eu enim. Nulla nec felis sed leo placerat imperdiet. \
Aenean suscipit nulla in justo. Suspendisse cursus rutrum augue. Nulla tincidunt tincidunt mi. \
Curabitur iaculis, lorem vel rhoncus faucibus, felis magna fermentum augue, et ultricies lacus lorem varius purus. \
Curabitur eu amet.";
