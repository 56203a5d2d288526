mod tests {
    use embedded_hal::delay::DelayNs;
    use myrtio_led_strip::{
        ArgumentError, CommandProcessor, CommandQueue, DeviceType, Duration, Error, PixelUpdate,
        ProcessError, ProcessReport, PulseRecorder, QueueFull, Strip, StripCommand, StripConfig,
    };

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type RecordedStrip = Strip<PulseRecorder<256>, NoDelay, 32>;

    type LongStrip = Strip<PulseRecorder<1024>, NoDelay, 128>;

    /// 30 WS2812 pixels stay on the wire for about a millisecond
    fn long_strip() -> LongStrip {
        Strip::init(
            StripConfig::new(DeviceType::Ws2812, 30, 17),
            PulseRecorder::new(),
            NoDelay,
        )
        .unwrap()
    }

    fn strip(device: DeviceType, pixel_count: usize) -> RecordedStrip {
        Strip::init(
            StripConfig::new(device, pixel_count, 17).with_rgbw(),
            PulseRecorder::new(),
            NoDelay,
        )
        .unwrap()
    }

    #[test]
    fn test_push_frame_appends_flush() {
        let queue = CommandQueue::<4>::new();
        let sender = queue.sender();
        let receiver = queue.receiver();

        sender
            .push_frame(&[PixelUpdate::new(0, 1, 2, 3, 4), PixelUpdate::new(1, 5, 6, 7, 8)])
            .unwrap();

        assert_eq!(queue.len(), 3);
        assert_eq!(
            receiver.try_receive(),
            Some(StripCommand::SetPixel(PixelUpdate::new(0, 1, 2, 3, 4)))
        );
        assert_eq!(
            receiver.try_receive(),
            Some(StripCommand::SetPixel(PixelUpdate::new(1, 5, 6, 7, 8)))
        );
        assert_eq!(receiver.try_receive(), Some(StripCommand::Flush));
        assert_eq!(receiver.try_receive(), None);
    }

    #[test]
    fn test_push_frame_is_all_or_nothing() {
        let queue = CommandQueue::<4>::new();
        let updates = [PixelUpdate::new(0, 1, 1, 1, 1); 4];

        assert_eq!(queue.push_frame(&updates), Err(QueueFull));
        assert!(queue.is_empty());

        queue.try_send(StripCommand::Flush).unwrap();
        assert_eq!(queue.push_frame(&updates[..3]), Err(QueueFull));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_process_pending_applies_frame() {
        let queue = CommandQueue::<8>::new();
        let mut processor = CommandProcessor::new(queue.receiver());
        let mut strip = strip(DeviceType::Sk6812, 2);

        queue
            .push_frame(&[PixelUpdate::new(0, 10, 20, 30, 40), PixelUpdate::new(1, 1, 2, 3, 4)])
            .unwrap();
        let report = processor.process_pending(&mut strip).unwrap();

        assert_eq!(
            report,
            ProcessReport {
                pixels_written: 2,
                flushes: 1
            }
        );
        assert_eq!(strip.bytes(), &[20, 10, 30, 40, 2, 1, 3, 4]);
        assert_eq!(strip.channel().transmissions(), 1);
        assert_eq!(
            strip.channel().decode::<8>().unwrap().as_slice(),
            &[20, 10, 30, 40, 2, 1, 3, 4]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_process_pending_stops_at_bad_index() {
        let queue = CommandQueue::<8>::new();
        let mut processor = CommandProcessor::new(queue.receiver());
        let mut strip = strip(DeviceType::Apa106, 2);

        queue
            .push_frame(&[PixelUpdate::new(5, 1, 2, 3, 4), PixelUpdate::new(0, 1, 2, 3, 4)])
            .unwrap();

        assert_eq!(
            processor.process_pending(&mut strip),
            Err(ProcessError {
                report: ProcessReport::default(),
                error: Error::InvalidArgument(ArgumentError::IndexOutOfRange { index: 5, len: 2 }),
            })
        );
        assert_eq!(queue.len(), 2);

        let report = processor.process_pending(&mut strip).unwrap();
        assert_eq!(report.pixels_written, 1);
        assert_eq!(report.flushes, 1);
        assert_eq!(strip.bytes(), &[1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn test_process_pending_keeps_command_while_transmitting() {
        let queue = CommandQueue::<8>::new();
        let mut processor = CommandProcessor::new(queue.receiver());
        let mut strip = long_strip();

        strip.flush().unwrap();
        queue
            .try_send(StripCommand::SetPixel(PixelUpdate::new(0, 1, 2, 3, 0)))
            .unwrap();

        assert_eq!(
            processor.process_pending(&mut strip),
            Err(ProcessError {
                report: ProcessReport::default(),
                error: Error::TransmissionInProgress,
            })
        );
        assert_eq!(queue.len(), 1);

        strip.wait_done(Duration::from_millis(100)).unwrap();
        let report = processor.process_pending(&mut strip).unwrap();
        assert_eq!(report.pixels_written, 1);
        assert_eq!(&strip.bytes()[..3], &[2u8, 1, 3]);
    }

    #[test]
    fn test_refused_command_never_leaves_full_queue() {
        let queue = CommandQueue::<2>::new();
        let mut processor = CommandProcessor::new(queue.receiver());
        let mut strip = long_strip();

        strip.flush().unwrap();
        queue.push_frame(&[PixelUpdate::new(0, 1, 2, 3, 0)]).unwrap();

        let result = processor.process_pending(&mut strip);

        assert_eq!(result.unwrap_err().error, Error::TransmissionInProgress);
        // No slot opens up for a producer while the command is refused
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.try_send(StripCommand::Flush), Err(QueueFull));
        assert_eq!(
            queue.receiver().try_receive(),
            Some(StripCommand::SetPixel(PixelUpdate::new(0, 1, 2, 3, 0)))
        );
    }

    #[test]
    fn test_process_pending_applies_back_to_back_frames() {
        let queue = CommandQueue::<8>::new();
        let mut processor = CommandProcessor::new(queue.receiver());
        let mut strip = long_strip();

        queue.push_frame(&[PixelUpdate::new(0, 1, 2, 3, 0)]).unwrap();
        queue.push_frame(&[PixelUpdate::new(1, 4, 5, 6, 0)]).unwrap();

        let report = processor.process_pending(&mut strip).unwrap();

        assert_eq!(
            report,
            ProcessReport {
                pixels_written: 2,
                flushes: 2
            }
        );
        assert!(queue.is_empty());
        assert_eq!(strip.channel().transmissions(), 2);
        assert_eq!(&strip.bytes()[..6], &[2u8, 1, 3, 5, 4, 6]);
    }

    #[test]
    fn test_process_pending_reports_work_done_before_failure() {
        let queue = CommandQueue::<8>::new();
        let mut processor = CommandProcessor::new(queue.receiver());
        let mut strip = long_strip();

        queue.push_frame(&[PixelUpdate::new(0, 1, 2, 3, 0)]).unwrap();
        queue.push_frame(&[PixelUpdate::new(40, 4, 5, 6, 0)]).unwrap();

        assert_eq!(
            processor.process_pending(&mut strip),
            Err(ProcessError {
                report: ProcessReport {
                    pixels_written: 1,
                    flushes: 1
                },
                error: Error::InvalidArgument(ArgumentError::IndexOutOfRange {
                    index: 40,
                    len: 30
                }),
            })
        );
        assert_eq!(strip.channel().transmissions(), 1);
        assert_eq!(queue.receiver().try_receive(), Some(StripCommand::Flush));
    }
}
