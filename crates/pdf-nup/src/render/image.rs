//! Image XObjects for rasterized items

use crate::raster::RenderedItem;
use crate::types::Result;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Dictionary, Object, Stream};
use std::io::Write;

/// Build an RGB image XObject stream holding the item's pixels.
///
/// Samples are stored as DeviceRGB, 8 bits per component, zlib-deflated
/// with a `FlateDecode` filter so the stream is written as-is.
pub fn image_xobject(item: &RenderedItem) -> Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(item.image.as_raw())?;
    let data = encoder.finish()?;

    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(item.width() as i64));
    dict.set("Height", Object::Integer(item.height() as i64));
    dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));

    Ok(Stream::new(dict, data).with_compression(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use image::{Rgb, RgbImage};
    use std::io::Read;

    #[test]
    fn test_image_xobject_dictionary() {
        let item = RenderedItem {
            image: RgbImage::from_pixel(3, 2, Rgb([10, 20, 30])),
        };
        let stream = image_xobject(&item).unwrap();

        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 3);
        assert_eq!(stream.dict.get(b"Height").unwrap().as_i64().unwrap(), 2);
        assert_eq!(
            stream.dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"FlateDecode"
        );

        let mut raw = Vec::new();
        ZlibDecoder::new(stream.content.as_slice())
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw.len(), 3 * 2 * 3);
        assert_eq!(&raw[..3], &[10, 20, 30]);
    }
}
