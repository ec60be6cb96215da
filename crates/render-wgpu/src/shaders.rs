/// WGSL for every lit surface: instanced primitives and the terrain.
///
/// Lighting is ambient plus one directional sun plus one point light with a
/// finite range, then linear distance fog. Emissive colour is added before
/// fog. Back faces flip their normal so the terrain lights from below too.
pub const LIT_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    // rgb colour, w intensity
    ambient: vec4<f32>,
    // xyz direction toward the sun, w unused
    sun_dir: vec4<f32>,
    sun_color: vec4<f32>,
    // xyz position, w range
    point_pos: vec4<f32>,
    point_color: vec4<f32>,
    fog_color: vec4<f32>,
    // x near, y far
    fog_range: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) emissive: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) emissive: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);
    // Approximate under non-uniform scale.
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = u.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = world_normal;
    out.color = instance.color;
    out.emissive = instance.emissive.rgb;
    return out;
}

@fragment
fn fs_main(in: VertexOutput, @builtin(front_facing) front: bool) -> @location(0) vec4<f32> {
    var n = normalize(in.world_normal);
    if (!front) {
        n = -n;
    }

    var light = u.ambient.rgb * u.ambient.w;

    let sun = max(dot(n, normalize(u.sun_dir.xyz)), 0.0);
    light += u.sun_color.rgb * u.sun_color.w * sun;

    let to_point = u.point_pos.xyz - in.world_pos;
    let dist = length(to_point);
    let falloff = clamp(1.0 - dist / u.point_pos.w, 0.0, 1.0);
    let point = max(dot(n, to_point / max(dist, 0.0001)), 0.0);
    light += u.point_color.rgb * u.point_color.w * point * falloff * falloff;

    let lit = in.color.rgb * light + in.emissive;

    let view_dist = distance(in.world_pos, u.camera_pos.xyz);
    let fog = clamp((view_dist - u.fog_range.x) / (u.fog_range.y - u.fog_range.x), 0.0, 1.0);
    return vec4<f32>(mix(lit, u.fog_color.rgb, fog), in.color.a);
}
"#;
