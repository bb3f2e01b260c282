//! Vector notation
//!
//! Bold, arrowed and unit vectors (starred forms use `\boldsymbol` so Greek
//! letters embolden too) and the vector-calculus operators.

use super::{aliases, register_starred};
use crate::registry::MacroRegistry;

pub fn register(registry: &mut MacroRegistry) {
    register_starred(registry, "\\vectorbold", "\\boldsymbol{#1}", "\\mathbf{#1}");
    register_starred(
        registry,
        "\\vectorarrow",
        "\\vec{\\boldsymbol{#1}}",
        "\\vec{\\mathbf{#1}}",
    );
    register_starred(
        registry,
        "\\vectorunit",
        "\\boldsymbol{\\hat{#1}}",
        "\\mathbf{\\hat{#1}}",
    );

    registry.register("\\dotproduct", "\\boldsymbol\\cdot");
    registry.register("\\crossproduct", "\\boldsymbol\\times");
    registry.register("\\gradient", "\\boldsymbol\\nabla");
    registry.register("\\divergence", "\\grad\\vdot");
    registry.register("\\curl", "\\grad\\cross");
    registry.register("\\laplacian", "\\nabla^2");

    aliases(
        registry,
        &[
            ("\\vb", "\\vectorbold"),
            ("\\va", "\\vectorarrow"),
            ("\\vu", "\\vectorunit"),
            ("\\vdot", "\\dotproduct"),
            ("\\cross", "\\crossproduct"),
            ("\\cp", "\\crossproduct"),
            ("\\grad", "\\gradient"),
            ("\\div", "\\divergence"),
        ],
    );
}
