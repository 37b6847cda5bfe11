//! Turns the EXIF block of a picture into a dictionary keyed by tag name.
//!
//! Tag names come from the tables of the `exif` crate. Fields of the GPS
//! IFD are gathered in a nested dictionary stored under [`GPS_INFO`].

use crate::{dms::Rational, error::{Error, Result}};

use std::{collections::BTreeMap, fmt, fs::File, io::BufReader, path::Path};
use exif::{Context, Exif, In, Reader, Tag, Value};
use log::debug;

/// Key of the nested dictionary holding the GPS sub-tags.
pub const GPS_INFO: &str = "GPSInfo";

pub type MetadataDictionary = BTreeMap<String, MetadataValue>;

/// A decoded tag value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Text(String),
    Rational(Vec<Rational>),
    Bytes(Vec<u8>),
    Nested(MetadataDictionary),
}

impl MetadataValue {
    pub fn as_nested(&self) -> Option<&MetadataDictionary> {
        if let MetadataValue::Nested(dictionary) = self {
            Some(dictionary)
        } else {
            None
        }
    }
}

fn ascii_to_string(components: &[Vec<u8>]) -> String {
    components
        .iter()
        .map(|component| {
            let end = component.iter().position(|byte| *byte == 0).unwrap_or(component.len());

            String::from_utf8_lossy(&component[..end]).into_owned()
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<&Value> for MetadataValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Byte(v) => MetadataValue::Integer(v.iter().map(|x| i64::from(*x)).collect()),
            Value::Short(v) => MetadataValue::Integer(v.iter().map(|x| i64::from(*x)).collect()),
            Value::Long(v) => MetadataValue::Integer(v.iter().map(|x| i64::from(*x)).collect()),
            Value::SByte(v) => MetadataValue::Integer(v.iter().map(|x| i64::from(*x)).collect()),
            Value::SShort(v) => MetadataValue::Integer(v.iter().map(|x| i64::from(*x)).collect()),
            Value::SLong(v) => MetadataValue::Integer(v.iter().map(|x| i64::from(*x)).collect()),
            Value::Float(v) => MetadataValue::Float(v.iter().map(|x| f64::from(*x)).collect()),
            Value::Double(v) => MetadataValue::Float(v.clone()),
            Value::Rational(v) => MetadataValue::Rational(v.iter().map(|x| Rational::from(*x)).collect()),
            Value::SRational(v) => MetadataValue::Rational(v.iter().map(|x| Rational::from(*x)).collect()),
            Value::Ascii(v) => MetadataValue::Text(ascii_to_string(v)),
            Value::Undefined(v, _) => MetadataValue::Bytes(v.clone()),
            Value::Unknown(..) => MetadataValue::Bytes(vec![]),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    if items.len() == 1 {
        return write!(f, "{}", items[0]);
    }

    write!(f, "(")?;

    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }

        write!(f, "{}", item)?;
    }

    write!(f, ")")
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Integer(v) => write_list(f, v),
            MetadataValue::Float(v) => write_list(f, v),
            MetadataValue::Rational(v) => write_list(f, v),
            MetadataValue::Text(text) => write!(f, "{:?}", text),
            MetadataValue::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            MetadataValue::Nested(dictionary) => write!(f, "<{} tags>", dictionary.len()),
        }
    }
}

/// Name of `tag` in the EXIF tables, or its number when the tables don't know it.
pub fn tag_name(tag: Tag) -> String {
    if tag.description().is_some() {
        tag.to_string()
    } else {
        tag.number().to_string()
    }
}

/// Builds the dictionary of the primary image of `exif`.
pub fn from_exif(exif: &Exif) -> MetadataDictionary {
    let mut dictionary = MetadataDictionary::new();
    let mut gps_info: Option<MetadataDictionary> = None;

    for field in exif.fields().filter(|field| field.ifd_num == In::PRIMARY) {
        if field.tag == Tag::GPSInfoIFDPointer {
            gps_info.get_or_insert_with(MetadataDictionary::new);
        } else if field.tag.context() == Context::Gps {
            gps_info
                .get_or_insert_with(MetadataDictionary::new)
                .insert(tag_name(field.tag), MetadataValue::from(&field.value));
        } else {
            dictionary.insert(tag_name(field.tag), MetadataValue::from(&field.value));
        }
    }

    if let Some(gps_info) = gps_info {
        dictionary.insert(GPS_INFO.to_string(), MetadataValue::Nested(gps_info));
    }

    dictionary
}

/// Reads the EXIF block of the picture at `path`.
///
/// A picture without any EXIF block gives an empty dictionary.
pub fn read_metadata(path: &Path) -> Result<MetadataDictionary> {
    let mut bufreader = BufReader::new(File::open(path)?);

    match Reader::new().read_from_container(&mut bufreader) {
        Ok(exif) => Ok(from_exif(&exif)),
        Err(exif::Error::NotFound(_)) => {
            debug!("No EXIF block in {:?}", path);

            Ok(MetadataDictionary::new())
        },
        Err(exif::Error::Io(e)) => Err(Error::Io(e)),
        Err(e) => Err(Error::Exif(e)),
    }
}
