//! Fragment-shader assembly.
//!
//! A fixed template holds the uniforms and the entry point; the
//! generated `plot` function is spliced in immediately before the
//! entry point. The entry point samples `plot` at the pixel and at
//! one-pixel offsets, estimates the gradient by finite differences,
//! and fades the curve over `|z| / |gradient|` so it keeps a roughly
//! constant on-screen width at any zoom.

/// Marks the start of the entry point; the plot function is inserted
/// right before it.
pub const SENTINEL: &str = "void main";

const TEMPLATE: &str = "\
#version 330

uniform vec4 axisRange; // (xLo, xHi, yLo, yHi)

in  vec2 fragTexCoord;
in  vec4 fragColor;
out vec4 finalColor;

void main()
{
    vec2 p = fragTexCoord;

    float x = axisRange.x + (axisRange.y - axisRange.x) * p.x;
    float y = axisRange.z + (axisRange.w - axisRange.z) * (1.0 - p.y);

    // uv deltas for neighbouring pixels
    float dx = dFdx(x);
    float dy = dFdy(y);

    float z = plot(x, y);
    vec2  z_lo = vec2(plot(x - dx, y), plot(x, y - dy));
    vec2  z_hi = vec2(plot(x + dx, y), plot(x, y + dy));

    vec2 z_delta = 0.5 * (z_hi - z_lo);
    float dist = abs(z / length(z_delta));

    float alpha = clamp(2.0 - dist, 0.0, 1.0);

    finalColor = vec4(1.0, 0.0, 0.0, alpha);
}
";

/// Splices a generated scalar expression into the template, producing
/// complete fragment-shader source.
pub fn assemble(expr: &str) -> String {
    let (prelude, entry) = match TEMPLATE.split_once(SENTINEL) {
        Some(parts) => parts,
        None => unreachable!("shader template lost its entry point"),
    };

    format!(
        "{prelude}float plot(float x, float y)\n\
         {{\n\
         \x20   float z = {expr};\n\
         \x20   return z;\n\
         }}\n\
         \n\
         {SENTINEL}{entry}"
    )
}
