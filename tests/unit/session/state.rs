use std::io::Cursor;

use super::*;

fn png_blob(width: u32, height: u32, rgba: [u8; 4]) -> UploadBlob {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    UploadBlob {
        bytes: buf,
        media_type: "image/png".to_string(),
    }
}

#[test]
fn size_roundtrips_in_range_and_ignores_out_of_range() {
    let mut session = Session::new();
    assert_eq!(session.size_px(), 40);

    for s in [24u32, 37, 60] {
        session.set_size(s).unwrap();
        assert_eq!(session.size_px(), s);
    }

    session.set_size(60).unwrap();
    for s in [0u32, 23, 61, 4000] {
        session.set_size(s).unwrap();
        assert_eq!(session.size_px(), 60);
    }
}

#[test]
fn load_produces_a_render_result_and_seeds_colors() {
    let mut session = Session::new();
    assert!(session.render_result().is_none());

    session
        .load_image(&png_blob(12, 9, [200, 200, 200, 255]))
        .unwrap();

    let png = session.render_result().expect("render result after load");
    let decoded = image::load_from_memory(png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (12, 9));

    let recommended = session.recommended_color().unwrap();
    assert_eq!(session.current_color(), Some(recommended));
    // Light gray source forces the dark recommendation.
    assert_eq!(recommended.l, 20.0);
}

#[test]
fn rejected_upload_leaves_state_untouched() {
    let mut session = Session::new();
    session
        .load_image(&png_blob(8, 8, [10, 10, 10, 255]))
        .unwrap();
    let before = session.render_result().map(<[u8]>::to_vec);

    let err = session
        .load_image(&UploadBlob {
            bytes: b"not an image".to_vec(),
            media_type: "text/plain".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, SubplateError::InvalidFileType(_)));

    let image = session.image().expect("prior image retained");
    assert_eq!((image.width, image.height), (8, 8));
    assert_eq!(session.render_result().map(<[u8]>::to_vec), before);
}

#[test]
fn rejection_before_any_image_keeps_session_empty() {
    let mut session = Session::new();
    let err = session
        .load_image(&UploadBlob {
            bytes: vec![0; 64],
            media_type: "text/plain".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, SubplateError::InvalidFileType(_)));
    assert!(session.image().is_none());
    assert!(session.render_result().is_none());
    assert!(session.current_color().is_none());
}

#[test]
fn color_set_and_reset_roundtrip() {
    let mut session = Session::new();
    session
        .load_image(&png_blob(10, 10, [0, 0, 255, 255]))
        .unwrap();
    let recommended = session.recommended_color().unwrap();

    session.set_color_hex("#ff0000").unwrap();
    let current = session.current_color().unwrap();
    assert_eq!((current.h, current.s, current.l), (0.0, 100.0, 50.0));

    assert!(session.set_color_hex("#nope12").is_err());
    assert_eq!(session.current_color(), Some(current));

    session.reset_color_to_recommended().unwrap();
    assert_eq!(session.current_color(), Some(recommended));
}

#[test]
fn user_picked_color_survives_a_new_image() {
    let mut session = Session::new();
    session
        .load_image(&png_blob(10, 10, [255, 255, 255, 255]))
        .unwrap();
    session.set_color_hex("#00ff00").unwrap();
    let picked = session.current_color().unwrap();

    session
        .load_image(&png_blob(6, 6, [0, 0, 0, 255]))
        .unwrap();
    assert_eq!(session.current_color(), Some(picked));
    // The recommendation itself tracks the new image.
    assert_eq!(session.recommended_color().unwrap().l, 80.0);
}

#[test]
fn export_without_a_render_fails_and_with_one_writes_a_file() {
    let session = Session::new();
    let err = session.export_into(&std::env::temp_dir()).unwrap_err();
    assert!(matches!(err, SubplateError::NothingToExport));

    let mut session = Session::new();
    session
        .load_image(&png_blob(5, 5, [1, 2, 3, 255]))
        .unwrap();
    let path = session.export_into(&std::env::temp_dir()).unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("subtitle-image-"));
    assert!(name.ends_with(".png"));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(Some(bytes.as_slice()), session.render_result());
    std::fs::remove_file(&path).unwrap();
}
