use crate::geometry::{Color, Point};
use crate::picture::{Picture, PictureResult};

pub fn pick_color(picture: &Picture, position: Point) -> PictureResult<Color> {
    picture.pixel_at(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::Edit;

    #[test]
    fn pick_reads_cell_color() {
        let color = Color::new(0x12, 0x34, 0x56);
        let picture = Picture::empty(2, 2, Color::WHITE)
            .unwrap()
            .draw(&[Edit::new(1, 0, color)]);
        assert_eq!(pick_color(&picture, Point::new(1, 0)), Ok(color));
        assert!(pick_color(&picture, Point::new(0, 5)).is_err());
    }
}
