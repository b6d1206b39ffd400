//! PLY (Stanford polygon) format support.
//!
//! Faces are read and written as general polygons, so quad meshes produced by
//! Catmull-Clark survive a save/load cycle unchanged. Saving always writes
//! ASCII PLY with double-precision coordinates.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

use crate::error::{MeshError, Result};
use crate::mesh::{build_from_polygons, to_face_vertex, HalfEdgeMesh};

/// Origin reported in errors when reading from an anonymous stream.
const STREAM: &str = "<stream>";

/// Load a mesh from a PLY file.
///
/// # Example
///
/// ```no_run
/// use subsurf::io::ply;
///
/// let mesh = ply::load("model.ply").unwrap();
/// println!("{} faces", mesh.num_faces());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<HalfEdgeMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read_from(&mut BufReader::new(file), path)
}

/// Read a mesh from any buffered PLY source (ASCII or binary).
pub fn read<R: BufRead>(reader: &mut R) -> Result<HalfEdgeMesh> {
    read_from(reader, Path::new(STREAM))
}

fn read_from<R: BufRead>(reader: &mut R, origin: &Path) -> Result<HalfEdgeMesh> {
    let load_error = |message: String| MeshError::LoadError {
        path: origin.to_path_buf(),
        message,
    };

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| load_error(e.to_string()))?;

    let vertex_element = ply
        .payload
        .get("vertex")
        .ok_or_else(|| load_error("PLY file has no vertex element".to_string()))?;

    let mut vertices: Vec<Point3<f64>> = Vec::with_capacity(vertex_element.len());
    for (i, vertex) in vertex_element.iter().enumerate() {
        let coord = |name: &str| {
            get_float_property(vertex, name)
                .ok_or_else(|| load_error(format!("vertex {} missing {} coordinate", i, name)))
        };
        vertices.push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
    }

    let face_element = ply
        .payload
        .get("face")
        .ok_or_else(|| load_error("PLY file has no face element".to_string()))?;

    let mut faces: Vec<Vec<usize>> = Vec::with_capacity(face_element.len());
    for (i, face) in face_element.iter().enumerate() {
        let indices = get_list_property(face, "vertex_indices")
            .or_else(|| get_list_property(face, "vertex_index"))
            .ok_or_else(|| load_error(format!("face {} missing vertex_indices property", i)))?;
        faces.push(indices);
    }

    if faces.is_empty() {
        return Err(load_error("PLY file contains no faces".to_string()));
    }

    log::debug!(
        "read {} vertices and {} faces from {}",
        vertices.len(),
        faces.len(),
        origin.display()
    );
    build_from_polygons(&vertices, &faces)
}

fn get_float_property(element: &DefaultElement, name: &str) -> Option<f64> {
    match element.get(name)? {
        Property::Float(v) => Some(*v as f64),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(*v as f64),
        Property::UInt(v) => Some(*v as f64),
        Property::Short(v) => Some(*v as f64),
        Property::UShort(v) => Some(*v as f64),
        Property::Char(v) => Some(*v as f64),
        Property::UChar(v) => Some(*v as f64),
        _ => None,
    }
}

/// Vertex index lists; negative entries are mapped past any valid index so
/// the builder reports them as invalid.
fn get_list_property(element: &DefaultElement, name: &str) -> Option<Vec<usize>> {
    fn signed<T: Copy + Into<i64>>(v: &[T]) -> Vec<usize> {
        v.iter()
            .map(|&x| usize::try_from(x.into()).unwrap_or(usize::MAX))
            .collect()
    }

    match element.get(name)? {
        Property::ListInt(v) => Some(signed(v)),
        Property::ListUInt(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListShort(v) => Some(signed(v)),
        Property::ListUShort(v) => Some(v.iter().map(|&x| x as usize).collect()),
        Property::ListChar(v) => Some(signed(v)),
        Property::ListUChar(v) => Some(v.iter().map(|&x| x as usize).collect()),
        _ => None,
    }
}

/// Save a mesh to a PLY file (ASCII format).
///
/// # Example
///
/// ```no_run
/// use subsurf::io::ply;
/// use subsurf::mesh::HalfEdgeMesh;
///
/// let mesh = HalfEdgeMesh::new();
/// ply::save(&mesh, "output.ply").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &HalfEdgeMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as ASCII PLY to any writer.
///
/// Faces with more than 255 sides do not fit the `uchar` list count and are
/// rejected.
pub fn write<W: Write>(mesh: &HalfEdgeMesh, writer: &mut W) -> Result<()> {
    let (vertices, faces) = to_face_vertex(mesh);

    if let Some(f) = faces.iter().position(|f| f.len() > u8::MAX as usize) {
        return Err(MeshError::invalid_param(
            "face",
            f,
            "PLY face lists hold at most 255 vertices",
        ));
    }

    writeln!(writer, "ply")?;
    writeln!(writer, "format ascii 1.0")?;
    writeln!(writer, "comment Generated by subsurf")?;
    writeln!(writer, "element vertex {}", vertices.len())?;
    writeln!(writer, "property double x")?;
    writeln!(writer, "property double y")?;
    writeln!(writer, "property double z")?;
    writeln!(writer, "element face {}", faces.len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for v in &vertices {
        writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
    }

    for f in &faces {
        write!(writer, "{}", f.len())?;
        for vi in f {
            write!(writer, " {}", vi)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
