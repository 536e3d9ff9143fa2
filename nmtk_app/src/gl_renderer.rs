//! OpenGL draw list renderer
//!
//! Draw lists are tessellated on the CPU into colored triangles and uploaded
//! once per list. Text runs become one block per glyph cell; there is no
//! font atlas.

use std::ffi::{c_void, CString};
use std::mem::size_of;
use std::ptr;

use bytemuck::{Pod, Zeroable};
use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use nmtk_core::config::{FormFactor, ShellConfig};
use nmtk_core::foundation::math::{Color, Rect, Vec2};
use nmtk_core::render::{DrawCommand, DrawList};
use nmtk_core::{GraphicsBackend, ShellError};
use thiserror::Error;

const VERTEX_SHADER: &str = r"
layout(location = 0) in vec2 a_position;
layout(location = 1) in vec4 a_color;
uniform vec2 u_display_size;
out vec4 v_color;

void main() {
    vec2 ndc = a_position / u_display_size * 2.0 - 1.0;
    gl_Position = vec4(ndc.x, -ndc.y, 0.0, 1.0);
    v_color = a_color;
}
";

const FRAGMENT_SHADER: &str = r"
in vec4 v_color;
out vec4 frag_color;

void main() {
    frag_color = v_color;
}
";

/// Renderer creation errors
#[derive(Error, Debug)]
pub enum RendererError {
    #[error("Shader compilation failed: {0}")]
    ShaderCompile(String),

    #[error("Program link failed: {0}")]
    ProgramLink(String),

    #[error("Invalid shader source: {0}")]
    InvalidSource(#[from] std::ffi::NulError),
}

/// Vertex layout shared with the shaders
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Appends the triangles for every command in `draw_list` to `vertices`
pub fn tessellate(draw_list: &DrawList, glyph_size: Vec2, vertices: &mut Vec<GlVertex>) {
    for command in &draw_list.commands {
        match command {
            DrawCommand::Rect { rect, color } => push_quad(vertices, *rect, *color),
            DrawCommand::Text { position, text, color, scale } => {
                let cell = glyph_size * *scale;
                let inset = Vec2::new(cell.x * 0.15, cell.y * 0.2);
                let mut x = position.x;
                for ch in text.chars() {
                    if !ch.is_whitespace() {
                        let min = Vec2::new(x, position.y) + inset;
                        let max = Vec2::new(x + cell.x, position.y + cell.y) - inset;
                        push_quad(vertices, Rect::new(min, max), *color);
                    }
                    x += cell.x;
                }
            }
        }
    }
}

fn push_quad(vertices: &mut Vec<GlVertex>, rect: Rect, color: Color) {
    let color = [color.x, color.y, color.z, color.w];
    let corner = |x: f32, y: f32| GlVertex { position: [x, y], color };
    let (min, max) = (rect.min, rect.max);
    vertices.extend_from_slice(&[
        corner(min.x, min.y),
        corner(max.x, min.y),
        corner(max.x, max.y),
        corner(min.x, min.y),
        corner(max.x, max.y),
        corner(min.x, max.y),
    ]);
}

/// OpenGL implementation of [`GraphicsBackend`]
pub struct GlRenderer {
    program: GLuint,
    vertex_buffer: GLuint,
    display_size_uniform: GLint,
    clear_color: [f32; 4],
    glyph_size: Vec2,
    vertices: Vec<GlVertex>,
}

impl GlRenderer {
    /// Load OpenGL entry points and build the UI shader program
    ///
    /// The main window's context must be current.
    pub fn new<F>(config: &ShellConfig, glyph_size: Vec2, loader: F) -> Result<Self, RendererError>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let header = match config.form_factor {
            FormFactor::Desktop => "#version 330 core\n",
            FormFactor::Handheld => "#version 300 es\nprecision mediump float;\n",
        };
        let program = unsafe {
            let vertex = compile_shader(gl::VERTEX_SHADER, &format!("{header}{VERTEX_SHADER}"))?;
            let fragment = compile_shader(gl::FRAGMENT_SHADER, &format!("{header}{FRAGMENT_SHADER}"))?;
            link_program(vertex, fragment)?
        };

        let mut vertex_buffer = 0;
        let uniform_name = CString::new("u_display_size")?;
        let display_size_uniform = unsafe {
            gl::GenBuffers(1, &mut vertex_buffer);
            gl::GetUniformLocation(program, uniform_name.as_ptr())
        };

        log::info!("OpenGL renderer ready ({:?})", config.form_factor);
        Ok(Self {
            program,
            vertex_buffer,
            display_size_uniform,
            clear_color: config.clear_color,
            glyph_size,
            vertices: Vec::new(),
        })
    }
}

unsafe fn compile_shader(kind: GLenum, source: &str) -> Result<GLuint, RendererError> {
    let shader = gl::CreateShader(kind);
    let source = CString::new(source)?;
    gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
    gl::CompileShader(shader);

    let mut status = GLint::from(gl::FALSE);
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
    if status == GLint::from(gl::TRUE) {
        return Ok(shader);
    }

    let mut length = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut length);
    let mut log = vec![0u8; usize::try_from(length).unwrap_or(0)];
    gl::GetShaderInfoLog(shader, length, ptr::null_mut(), log.as_mut_ptr().cast::<GLchar>());
    gl::DeleteShader(shader);
    Err(RendererError::ShaderCompile(String::from_utf8_lossy(&log).trim_end_matches('\0').to_string()))
}

unsafe fn link_program(vertex: GLuint, fragment: GLuint) -> Result<GLuint, RendererError> {
    let program = gl::CreateProgram();
    gl::AttachShader(program, vertex);
    gl::AttachShader(program, fragment);
    gl::LinkProgram(program);
    gl::DeleteShader(vertex);
    gl::DeleteShader(fragment);

    let mut status = GLint::from(gl::FALSE);
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
    if status == GLint::from(gl::TRUE) {
        return Ok(program);
    }

    let mut length = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut length);
    let mut log = vec![0u8; usize::try_from(length).unwrap_or(0)];
    gl::GetProgramInfoLog(program, length, ptr::null_mut(), log.as_mut_ptr().cast::<GLchar>());
    gl::DeleteProgram(program);
    Err(RendererError::ProgramLink(String::from_utf8_lossy(&log).trim_end_matches('\0').to_string()))
}

impl GraphicsBackend for GlRenderer {
    #[allow(clippy::cast_possible_wrap)]
    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as GLsizei, height as GLsizei);
        }
    }

    fn clear(&mut self) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render_draw_list(&mut self, draw_list: &DrawList) -> Result<(), ShellError> {
        self.vertices.clear();
        tessellate(draw_list, self.glyph_size, &mut self.vertices);
        let size = draw_list.display_size;
        if self.vertices.is_empty() || size.x <= 0.0 || size.y <= 0.0 {
            return Ok(());
        }

        let bytes: &[u8] = bytemuck::cast_slice(&self.vertices);
        let stride = size_of::<GlVertex>() as GLsizei;
        unsafe {
            gl::Viewport(0, 0, size.x as GLsizei, size.y as GLsizei);
            gl::Disable(gl::DEPTH_TEST);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::UseProgram(self.program);
            gl::Uniform2f(self.display_size_uniform, size.x, size.y);

            // Vertex array objects are not shared between contexts
            let mut vertex_array = 0;
            gl::GenVertexArrays(1, &mut vertex_array);
            gl::BindVertexArray(vertex_array);
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vertex_buffer);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr().cast(),
                gl::STREAM_DRAW,
            );
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 2, gl::FLOAT, gl::FALSE, stride, ptr::null());
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(1, 4, gl::FLOAT, gl::FALSE, stride, (2 * size_of::<f32>()) as *const c_void);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertices.len() as GLsizei);
            gl::BindVertexArray(0);
            gl::DeleteVertexArrays(1, &vertex_array);

            match gl::GetError() {
                gl::NO_ERROR => Ok(()),
                code => Err(ShellError::Graphics(format!("draw list submission failed (0x{code:04x})"))),
            }
        }
    }

    fn shutdown(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.vertex_buffer);
            gl::DeleteProgram(self.program);
        }
        self.vertex_buffer = 0;
        self.program = 0;
        log::info!("OpenGL resources released");
    }
}
