mod tests {
    use myrtio_led_strip::pixel_buffer::CapacityError;
    use myrtio_led_strip::{ArgumentError, ChannelOrder, PixelBuffer, PixelLayout, Rgb};

    #[test]
    fn test_grb_three_channel() {
        let layout = PixelLayout::new(ChannelOrder::Grb, false);
        let mut buffer = PixelBuffer::<64>::new(layout, 2).unwrap();

        buffer.set(0, 10, 20, 30, 0).unwrap();
        buffer.set(1, 1, 2, 3, 0).unwrap();

        assert_eq!(buffer.as_bytes(), &[20, 10, 30, 2, 1, 3]);
    }

    #[test]
    fn test_rgb_four_channel() {
        let layout = PixelLayout::new(ChannelOrder::Rgb, true);
        let mut buffer = PixelBuffer::<64>::new(layout, 1).unwrap();

        buffer.set(0, 5, 6, 7, 9).unwrap();

        assert_eq!(buffer.as_bytes(), &[5, 6, 7, 9]);
    }

    #[test]
    fn test_white_dropped_on_three_channel() {
        let layout = PixelLayout::new(ChannelOrder::Rgb, false);
        let mut buffer = PixelBuffer::<64>::new(layout, 2).unwrap();

        buffer.set(0, 5, 6, 7, 9).unwrap();

        assert_eq!(buffer.as_bytes(), &[5, 6, 7, 0, 0, 0]);
    }

    #[test]
    fn test_index_equal_to_length_rejected() {
        let layout = PixelLayout::new(ChannelOrder::Grb, true);
        let mut buffer = PixelBuffer::<64>::new(layout, 3).unwrap();

        assert_eq!(
            buffer.set(3, 1, 1, 1, 1),
            Err(ArgumentError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(buffer.as_bytes().iter().all(|byte| *byte == 0));
        assert_eq!(buffer.as_bytes().len(), 12);
    }

    #[test]
    fn test_zeroed_on_allocation() {
        let layout = PixelLayout::new(ChannelOrder::Grb, false);
        let buffer = PixelBuffer::<30>::new(layout, 10).unwrap();
        assert_eq!(buffer.as_bytes(), &[0; 30]);
    }

    #[test]
    fn test_capacity_exceeded() {
        let layout = PixelLayout::new(ChannelOrder::Grb, true);
        assert_eq!(
            PixelBuffer::<8>::new(layout, 3).unwrap_err(),
            CapacityError {
                requested: 12,
                capacity: 8
            }
        );
    }

    #[test]
    fn test_pixel_and_clear() {
        let layout = PixelLayout::new(ChannelOrder::Grb, false);
        let mut buffer = PixelBuffer::<64>::new(layout, 2).unwrap();

        buffer.set_rgb(1, Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(buffer.pixel(1), Some(&[2, 1, 3][..]));
        assert_eq!(buffer.pixel(2), None);

        buffer.clear();
        assert_eq!(buffer.pixel(1), Some(&[0, 0, 0][..]));
    }

    #[test]
    fn test_channel_size() {
        assert_eq!(PixelLayout::new(ChannelOrder::Grb, false).channel_size(), 3);
        assert_eq!(PixelLayout::new(ChannelOrder::Rgb, true).channel_size(), 4);
    }
}
