use dynartic::filters::{
    antialias, border, character, explosion, point_ring, pretty_noise, punch_image, punch_point,
    punch_wave, recontrast, BlurMode,
};
use dynartic::output::{encode_png, AlphaMode};
use dynartic::{Color, Error, FilterStep, Raster, Recipe, Rng};

fn pixels(raster: &Raster<'_>) -> Vec<[u8; 4]> {
    raster
        .as_bytes()
        .chunks_exact(4)
        .map(|c| [c[0], c[1], c[2], c[3]])
        .collect()
}

#[test]
fn test_fill_then_single_write_scenario() {
    let mut buf = vec![0xFF; 4 * 4 * 4];
    let mut raster = Raster::new(4, 4, &mut buf).unwrap();
    assert!(pixels(&raster).iter().all(|&p| p == [0, 0, 0, 0]));

    raster.fill_color(Color::rgb(10.0, 20.0, 30.0));
    assert!(pixels(&raster).iter().all(|&p| p == [10, 20, 30, 0]));

    raster.set_color(1.0, 1.0, Color::new(200.0, 200.0, 200.0, 255.0));
    let all = pixels(&raster);
    for (i, p) in all.iter().enumerate() {
        if i == 4 + 1 {
            assert_eq!(*p, [200, 200, 200, 255]);
        } else {
            assert_eq!(*p, [10, 20, 30, 0]);
        }
    }
}

#[test]
fn test_buffer_is_shared_with_caller() {
    let mut buf = vec![0u8; 2 * 2 * 4];
    {
        let mut raster = Raster::new(2, 2, &mut buf).unwrap();
        raster.set_color(1.0, 0.0, Color::new(1.0, 2.0, 3.0, 4.0));
    }
    assert_eq!(&buf[4..8], &[1, 2, 3, 4]);
}

#[test]
fn test_every_filter_ignores_off_canvas_coordinates() {
    let mut buf = vec![0u8; 6 * 6 * 4];
    let mut raster = Raster::new(6, 6, &mut buf).unwrap();
    raster.fill_color(Color::new(90.0, 90.0, 90.0, 255.0));
    let before = pixels(&raster);

    point_ring(&mut raster, -50.0, -50.0, 5.0, 3.0, 2.0).unwrap();
    punch_image(&mut raster, 100.0, 100.0, 10.0, 10.0, 50.0, 2.0).unwrap();
    punch_wave(&mut raster, -40.0, 3.0, 10.0, 10.0, 50.0, 2.0, 0.2).unwrap();
    punch_point(&mut raster, 6.0, 6.0, 50.0).unwrap();
    assert_eq!(pixels(&raster), before);
}

#[test]
fn test_full_filter_chain_on_small_canvas() {
    let (w, h) = (24u32, 18u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let mut raster = Raster::new(w, h, &mut buf).unwrap();
    let mut rng = Rng::new(2024);

    raster.fill_color(Color::new(140.0, 90.0, 200.0, 255.0));
    point_ring(&mut raster, 12.0, 9.0, 6.0, 1.5, 2.0).unwrap();
    punch_image(&mut raster, 6.0, 6.0, 8.0, 8.0, 90.0, 3.0).unwrap();
    punch_wave(&mut raster, 18.0, 12.0, 10.0, 10.0, 40.0, 4.0, 0.1).unwrap();
    explosion(&mut raster, 18.0, 4.0, 0.2, 0.2, 30.0, &mut rng).unwrap();
    pretty_noise(&mut raster, w, h, 16.0, &mut rng).unwrap();
    character(&mut raster, w, h, &mut rng).unwrap();
    recontrast(&mut raster, 128.0, 10.0).unwrap();
    border(&mut raster, w, h, 255.0, 255.0, 255.0, 3).unwrap();
    antialias(&mut raster, w, h, BlurMode::Snapshot).unwrap();

    assert_eq!(raster.as_bytes().len(), (w * h * 4) as usize);
    let png = encode_png(raster.as_bytes(), w, h, AlphaMode::Opaque).unwrap();
    assert!(!png.is_empty());
}

#[test]
fn test_invalid_parameters_leave_canvas_untouched() {
    let mut buf = vec![0u8; 3 * 3 * 4];
    let mut raster = Raster::new(3, 3, &mut buf).unwrap();
    raster.fill_color(Color::new(50.0, 50.0, 50.0, 50.0));
    let before = pixels(&raster);

    let err = punch_image(&mut raster, 1.0, 1.0, 2.0, 2.0, 10.0, -3.0).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidFilterParameter {
            filter: "punch_image",
            parameter: "spread",
            ..
        }
    ));
    assert!(recontrast(&mut raster, f64::NAN, 1.0).is_err());
    assert_eq!(pixels(&raster), before);
}

#[test]
fn test_recipe_replays_identically_through_json() {
    let recipe = Recipe::random(30, 20, 314);
    let json = serde_json::to_string(&recipe).unwrap();
    let replayed: Recipe = serde_json::from_str(&json).unwrap();
    assert_eq!(recipe.render().unwrap(), replayed.render().unwrap());
}

#[test]
fn test_hand_built_recipe() {
    let mut recipe = Recipe::new(5, 5, 0);
    recipe.push(FilterStep::Fill {
        r: 10.0,
        g: 10.0,
        b: 10.0,
        a: 255.0,
    });
    let pixels = recipe.render().unwrap();
    assert!(pixels.chunks_exact(4).all(|p| p == [10, 10, 10, 255]));
}
