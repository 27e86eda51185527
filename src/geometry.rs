use cgmath::Point3;

/// Integer pixel coordinate produced by the projection.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// 8-bit color, as handed to the canvas.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl From<Rgba> for wgpu::Color {
    fn from(color: Rgba) -> Self {
        let [r, g, b, a] = color.to_f32();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

/// Half the edge length of the cube.
pub const CUBE_HALF_SIZE: f32 = 100.0;

// bottom face (z = -100) first, then top face (z = +100), same winding
#[rustfmt::skip]
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0],
    [ 1.0,  1.0, -1.0],
    [-1.0,  1.0, -1.0],
    [-1.0, -1.0,  1.0],
    [ 1.0, -1.0,  1.0],
    [ 1.0,  1.0,  1.0],
    [-1.0,  1.0,  1.0],
];

/// Index pairs into [`cube_vertices`]: bottom ring, top ring, then the four uprights.
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// The eight corners of the 200-unit cube centered on the origin.
pub fn cube_vertices() -> [Point3<f32>; 8] {
    CUBE_CORNERS.map(|[x, y, z]| {
        Point3::new(x * CUBE_HALF_SIZE, y * CUBE_HALF_SIZE, z * CUBE_HALF_SIZE)
    })
}

#[repr(C)] //layout the struct in memory how a C compiler would, so it can be uploaded as is
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 2], //normalized device coordinates
    pub color: [f32; 4],
}

impl LineVertex {
    /// Converts a pixel coordinate on a `width` x `height` surface to clip space.
    /// The pixel center is used so that axis aligned lines land on whole pixels.
    pub fn from_screen(point: ScreenPoint, width: u32, height: u32, color: Rgba) -> Self {
        let x = (point.x as f32 + 0.5) / width as f32 * 2.0 - 1.0;
        let y = 1.0 - (point.y as f32 + 0.5) / height as f32 * 2.0;
        Self {
            position: [x, y],
            color: color.to_f32(),
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress, //how far the shader skips to reach the next vertex
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
