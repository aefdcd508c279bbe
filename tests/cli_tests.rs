#[cfg(test)]
mod tests {
    use clap::Parser;
    use ctrlgraph::cli::{render_lane, step_quantize, RenderRequest};
    use ctrlgraph::*;

    #[test]
    fn test_quantize_args() {
        let args = Args::parse_from(["ctrlgraph", "quantize", "12", "--wheel", "up"]);
        match args.command {
            Command::Quantize {
                value,
                wheel,
                interactive,
            } => {
                assert_eq!(value, 12.0);
                assert_eq!(wheel, Some(WheelDirection::Up));
                assert!(!interactive);
                assert_eq!(step_quantize(value, wheel), 24.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_render_args() {
        let args = Args::parse_from([
            "ctrlgraph",
            "--config",
            "graph.toml",
            "render",
            "--lane",
            "cc:11",
            "--point",
            "0:64",
            "--point",
            "480:100",
            "--click",
            "25,10",
            "--axis",
            "2",
        ]);
        assert_eq!(args.config.as_deref(), Some(std::path::Path::new("graph.toml")));
        match args.command {
            Command::Render {
                lane,
                points,
                clicks,
                axis_clicks,
                position,
                scroll_left,
            } => {
                assert_eq!(lane, Lane::Controller(11));
                assert_eq!(points, vec![(0, 64.0), (480, 100.0)]);
                assert_eq!(clicks, vec![(25.0, 10.0)]);
                assert_eq!(axis_clicks, vec![2]);
                assert_eq!(position, 0);
                assert_eq!(scroll_left, 0.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_render_defaults_to_pitch_lane() {
        let args = Args::parse_from(["ctrlgraph", "render"]);
        assert!(matches!(
            args.command,
            Command::Render {
                lane: Lane::PitchBend,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_lane_is_rejected() {
        let result = Args::try_parse_from(["ctrlgraph", "render", "--lane", "cc:300"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_lane_lists_events() {
        let mut request = RenderRequest::new(Lane::PitchBend);
        request.points = vec![(0, 8192.0)];
        request.clicks = vec![(25.0, 10.0)];

        let output = render_lane(&request, &AppConfig::default()).unwrap();
        assert!(output.contains("pitch events:"));
        assert!(output.contains("#0 tick 0 value 8192"));
        assert!(output.contains("#1 tick 240 value 8192"));
        // one row per canvas line plus the event listing
        assert_eq!(output.lines().count(), 20 + 3);
    }

    #[test]
    fn test_render_lane_rejects_flat_graph() {
        let mut config = AppConfig::default();
        config.graph.height = 4.0;
        let request = RenderRequest::new(Lane::Controller(7));
        assert!(render_lane(&request, &config).is_err());
    }
}
