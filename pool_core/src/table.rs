use glam::Vec2;

use crate::config::Config;

/// A pocket opening, identified by a stable index (0-5)
#[derive(Debug, Clone, Copy)]
pub struct Pocket {
    pub index: usize,
    pub center: Vec2,
}

/// Table geometry derived from the configured playing area.
///
/// Pocket indices are stable and shared with the animation layer:
/// 0-3 are the corners (bottom-left, bottom-right, top-left, top-right),
/// 4-5 the side pockets on the bottom and top rails.
#[derive(Debug, Clone)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    pub pockets: [Pocket; 6],
}

impl Table {
    pub fn standard(config: &Config) -> Self {
        let w = config.table_width;
        let h = config.table_height;
        let centers = [
            Vec2::new(0.0, 0.0),
            Vec2::new(w, 0.0),
            Vec2::new(0.0, h),
            Vec2::new(w, h),
            Vec2::new(w / 2.0, 0.0),
            Vec2::new(w / 2.0, h),
        ];
        let mut pockets = [Pocket {
            index: 0,
            center: Vec2::ZERO,
        }; 6];
        for (index, center) in centers.into_iter().enumerate() {
            pockets[index] = Pocket { index, center };
        }
        Self {
            width: w,
            height: h,
            pockets,
        }
    }

    /// Where the cue ball starts: centre of the head string
    pub fn head_spot(&self) -> Vec2 {
        Vec2::new(self.width / 4.0, self.height / 2.0)
    }

    /// Rack apex / 8-ball respot position
    pub fn foot_spot(&self) -> Vec2 {
        Vec2::new(self.width * 3.0 / 4.0, self.height / 2.0)
    }

    /// Behind the head string (ball-in-hand after most fouls)
    pub fn in_kitchen(&self, pos: Vec2) -> bool {
        pos.x <= self.width / 4.0
    }

    pub fn contains(&self, pos: Vec2, ball_radius: f32) -> bool {
        pos.x >= ball_radius
            && pos.x <= self.width - ball_radius
            && pos.y >= ball_radius
            && pos.y <= self.height - ball_radius
    }

    /// True when `pos` sits inside a pocket mouth, where no cushion spans
    /// the rail.
    pub fn in_pocket_gap(&self, pos: Vec2, mouth_radius: f32) -> bool {
        self.pockets
            .iter()
            .any(|p| p.center.distance_squared(pos) < mouth_radius * mouth_radius)
    }

    /// The fifteen rack slot centres, apex on the foot spot, rows growing
    /// toward the foot rail. Slot 4 is the centre of the third row; slots
    /// 10 and 14 are the rear corners. Spacing carries a hair of slack so
    /// racked balls never start in contact.
    pub fn rack_slots(&self, ball_radius: f32) -> [Vec2; 15] {
        let apex = self.foot_spot();
        let gap = 2.0 * ball_radius * 1.001;
        let row_dx = gap * (std::f32::consts::PI / 6.0).cos();

        let mut slots = [Vec2::ZERO; 15];
        let mut slot = 0;
        for row in 0..5 {
            for place in 0..=row {
                let x = apex.x + row as f32 * row_dx;
                let y = apex.y + (place as f32 - row as f32 / 2.0) * gap;
                slots[slot] = Vec2::new(x, y);
                slot += 1;
            }
        }
        slots
    }
}
