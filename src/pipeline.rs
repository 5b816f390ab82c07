use crate::{BorderCrop, Error, Rect, Result};

use image::{DynamicImage, ImageError, ImageFormat};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, dispatcher, info};

/// Opens and decodes a PNG file.
pub fn load(path: &Path) -> Result<DynamicImage> {
    debug!(path = %path.display(), "opening image file");
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })?;

    debug!("decoding image");
    let image = image::load(BufReader::new(file), ImageFormat::Png).map_err(|source| Error::Decode {
        path: path.to_owned(),
        source,
    })?;

    debug!(width = image.width(), height = image.height(), color = ?image.color(), "decoded image");
    Ok(image)
}

/// Encodes `image` as PNG into a new file at `path`.
pub fn save(image: &DynamicImage, path: &Path) -> Result<()> {
    debug!(path = %path.display(), "creating cropped image file");
    let file = File::create(path).map_err(|source| Error::Create {
        path: path.to_owned(),
        source,
    })?;

    debug!("encoding cropped image");
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .and_then(|()| writer.flush().map_err(ImageError::IoError))
        .map_err(|source| Error::Encode {
            path: path.to_owned(),
            source,
        })
}

impl BorderCrop {
    /// Reads `input`, crops it, and writes the result to `output`.
    ///
    /// The output file is only created once a border has been located.
    pub fn run(&self, input: &Path, output: &Path) -> Result<Rect> {
        dispatcher::with_default(&self.log, || {
            info!(strategy = ?self.strategy, "starting image cropping of {}", input.display());

            let image = load(input)?;
            let (rect, cropped) = self.crop(&image)?;
            save(&cropped, output)?;

            info!("image cropping completed, wrote {}", output.display());
            Ok(rect)
        })
    }
}
