use emu8_core::{Chip8, Keypad, Mode};
use proptest::prelude::*;

fn boot(program: &[u8]) -> Chip8 {
    Chip8::new(program).unwrap()
}

fn run(chip8: &mut Chip8, ticks: usize) {
    for _ in 0..ticks {
        chip8.tick(&Keypad::new()).unwrap();
    }
}

/// CLS; V0 = x; V1 = y; I = sprite; DRW V0, V1, n (`draws` times); loop forever; sprite bytes
fn sprite_program(x: u8, y: u8, sprite: &[u8], draws: usize) -> Vec<u8> {
    let sprite_at = 0x200 + 8 + 2 * draws + 2;
    let mut program = vec![
        0x00,
        0xE0,
        0x60,
        x,
        0x61,
        y,
        0xA0 | (sprite_at >> 8) as u8,
        sprite_at as u8,
    ];
    for _ in 0..draws {
        program.extend_from_slice(&[0xD0, 0x10 | sprite.len() as u8]);
    }
    let halt_at = sprite_at - 2;
    program.extend_from_slice(&[0x10 | (halt_at >> 8) as u8, halt_at as u8]);
    program.extend_from_slice(sprite);
    program
}

proptest! {
    #[test]
    fn add_sets_carry_iff_sum_overflows(a in any::<u8>(), b in any::<u8>()) {
        let mut chip8 = boot(&[0x6A, a, 0x6B, b, 0x8A, 0xB4]);
        run(&mut chip8, 3);
        let v = chip8.state().registers.v;
        prop_assert_eq!(v[0xA], a.wrapping_add(b));
        prop_assert_eq!(v[0xF] == 1, u16::from(a) + u16::from(b) > 255);
    }

    #[test]
    fn sub_sets_flag_iff_no_borrow(a in any::<u8>(), b in any::<u8>()) {
        let mut chip8 = boot(&[0x6A, a, 0x6B, b, 0x8A, 0xB5]);
        run(&mut chip8, 3);
        let v = chip8.state().registers.v;
        prop_assert_eq!(v[0xA], a.wrapping_sub(b));
        prop_assert_eq!(v[0xF] == 1, a >= b);
    }

    #[test]
    fn reverse_sub_sets_flag_iff_no_borrow(a in any::<u8>(), b in any::<u8>()) {
        let mut chip8 = boot(&[0x6A, a, 0x6B, b, 0x8A, 0xB7]);
        run(&mut chip8, 3);
        let v = chip8.state().registers.v;
        prop_assert_eq!(v[0xA], b.wrapping_sub(a));
        prop_assert_eq!(v[0xF] == 1, b >= a);
    }

    #[test]
    fn shifts_keep_the_lost_bit(a in any::<u8>()) {
        let mut right = boot(&[0x6A, a, 0x8A, 0xA6]);
        run(&mut right, 2);
        prop_assert_eq!(right.state().registers.v[0xA], a >> 1);
        prop_assert_eq!(right.state().registers.v[0xF], a & 1);

        let mut left = boot(&[0x6A, a, 0x8A, 0xAE]);
        run(&mut left, 2);
        prop_assert_eq!(left.state().registers.v[0xA], a << 1);
        prop_assert_eq!(left.state().registers.v[0xF], a >> 7);
    }

    #[test]
    fn clear_then_draw_reproduces_sprite(
        x in 0u8..64,
        y in 0u8..32,
        sprite in prop::collection::vec(any::<u8>(), 1..16),
    ) {
        let mut chip8 = boot(&sprite_program(x, y, &sprite, 1));
        run(&mut chip8, 5);
        let frame = chip8.frame_buffer();
        for (row, byte) in sprite.iter().enumerate() {
            for col in 0..8 {
                let expected = (byte >> (7 - col)) & 1 == 1;
                prop_assert_eq!(frame.get(x as usize + col, y as usize + row), expected);
            }
        }
        let bits: u32 = sprite.iter().map(|b| b.count_ones()).sum();
        prop_assert_eq!(frame.lit_count(), bits as usize);
        prop_assert_eq!(chip8.state().registers.v[0xF], 0);
    }

    #[test]
    fn drawing_twice_restores_the_screen(
        x in any::<u8>(),
        y in any::<u8>(),
        sprite in prop::collection::vec(any::<u8>(), 1..16),
    ) {
        let mut chip8 = boot(&sprite_program(x, y, &sprite, 2));
        run(&mut chip8, 5);
        let once = *chip8.frame_buffer();
        run(&mut chip8, 1);
        prop_assert_eq!(chip8.frame_buffer().lit_count(), 0);
        let any_lit = sprite.iter().any(|b| *b != 0);
        prop_assert_eq!(chip8.state().registers.v[0xF] == 1, any_lit);
        prop_assert_eq!(once.lit_count() > 0, any_lit);
    }

    #[test]
    fn call_then_return_resumes_after_call(target in 0x101u16..0x7FF) {
        let target = target * 2;
        let mut program = vec![0u8; (target - 0x200) as usize + 2];
        program[0] = 0x20 | (target >> 8) as u8;
        program[1] = target as u8;
        let at = (target - 0x200) as usize;
        program[at..at + 2].copy_from_slice(&[0x00, 0xEE]);

        let mut chip8 = boot(&program);
        let depth = chip8.state().stack.depth();
        run(&mut chip8, 1);
        prop_assert_eq!(chip8.state().pc, target);
        run(&mut chip8, 1);
        prop_assert_eq!(chip8.state().pc, 0x202);
        prop_assert_eq!(chip8.state().stack.depth(), depth);
    }

    #[test]
    fn bcd_splits_digits(value in any::<u8>()) {
        let mut chip8 = boot(&[0x65, value, 0xA3, 0x00, 0xF5, 0x33]);
        run(&mut chip8, 3);
        let digits = chip8.state().memory.slice(0x300, 3).unwrap().to_vec();
        prop_assert_eq!(u32::from(digits[0]) * 100 + u32::from(digits[1]) * 10 + u32::from(digits[2]), u32::from(value));
        prop_assert!(digits.iter().all(|d| *d < 10));
    }

    #[test]
    fn timers_fall_one_per_tick_and_stop_at_zero(start in any::<u8>(), ticks in 3usize..400) {
        // V0 = start; DT = V0; ST = V0; loop
        let mut chip8 = boot(&[0x60, start, 0xF0, 0x15, 0xF0, 0x18, 0x12, 0x06]);
        run(&mut chip8, 2);
        prop_assert_eq!(chip8.state().timers.delay, start.saturating_sub(1));
        run(&mut chip8, ticks - 2);
        let expected_delay = (start as usize).saturating_sub(ticks - 1) as u8;
        prop_assert_eq!(chip8.state().timers.delay, expected_delay);
        // the sound timer was loaded one tick later
        let expected_sound = (start as usize).saturating_sub(ticks - 2) as u8;
        prop_assert_eq!(chip8.state().timers.sound, expected_sound);
    }

    #[test]
    fn await_key_waits_then_takes_lowest(
        idle in 0usize..20,
        pressed in prop::collection::btree_set(0u8..16, 1..16),
    ) {
        let mut chip8 = boot(&[0xF7, 0x0A, 0x12, 0x02]);
        for _ in 0..idle {
            chip8.tick(&Keypad::new()).unwrap();
            prop_assert_eq!(chip8.state().pc, 0x200);
            prop_assert_eq!(chip8.state().registers.v, [0; 16]);
            prop_assert_eq!(chip8.mode(), Mode::AwaitingKey { register: 7 });
        }
        let mut keypad = Keypad::new();
        for key in &pressed {
            keypad.press(*key);
        }
        chip8.tick(&keypad).unwrap();
        prop_assert_eq!(chip8.mode(), Mode::Running);
        prop_assert_eq!(chip8.state().registers.v[7], *pressed.iter().next().unwrap());
        prop_assert_eq!(chip8.state().pc, 0x202);
    }
}

#[test]
fn bcd_of_157() {
    let mut chip8 = boot(&[0x65, 157, 0xA3, 0x00, 0xF5, 0x33]);
    run(&mut chip8, 3);
    assert_eq!(chip8.state().memory.slice(0x300, 3).unwrap(), [1, 5, 7]);
}

#[test]
fn sprite_at_right_edge_wraps_to_column_zero() {
    let mut chip8 = boot(&sprite_program(63, 0, &[0xFF], 1));
    run(&mut chip8, 5);
    let frame = chip8.frame_buffer();
    assert!(frame.get(63, 0));
    for x in 0..7 {
        assert!(frame.get(x, 0), "column {} should be lit", x);
    }
    assert!(!frame.get(7, 0));
    assert!(!frame.get(62, 0));
    assert_eq!(frame.lit_count(), 8);
}

#[test]
fn font_glyphs_are_drawable() {
    // V0 = A; I = glyph(V0); DRW V1, V1, 5
    let mut chip8 = boot(&[0x60, 0x0A, 0xF0, 0x29, 0xD1, 0x15]);
    run(&mut chip8, 3);
    let frame = chip8.frame_buffer();
    // A: F0 90 F0 90 90
    assert!(frame.get(0, 0) && frame.get(3, 0));
    assert!(frame.get(0, 1) && !frame.get(1, 1));
    assert_eq!(frame.lit_count(), 4 + 2 + 4 + 2 + 2);
}
