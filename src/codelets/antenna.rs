//! Codelets for lasers emitted by a current-driven antenna in fieldBackground.param.
//!
//! The pulse codelets expect the `transverse` and `longitudinal` placeholders to
//! hold the already rendered geometry codelets.

pub(super) const PULSES: &[(&str, &str)] = &[
    (
        "linear",
        r#"            if( cellIdx.y() == int( ${y_antenna} / SI::CELL_HEIGHT_SI ) )
            {
                constexpr float_64 laser_frequency_SI( SI::SPEED_OF_LIGHT_SI / ${wavelength} );
                constexpr float_64 laser_tau_SI( ${tau} );
                constexpr float_64 laser_delay_SI( ${delay} );
                constexpr float_64 laser_waist_SI( ${waist} );
                constexpr float_64 A0( ${a0} );
                constexpr float_64 A0_to_J = -4.0 * PI * SI::ELECTRON_MASS_SI / ${wavelength} * SI::SPEED_OF_LIGHT_SI / SI::ELECTRON_CHARGE_SI / SI::MUE0_SI / SI::CELL_HEIGHT_SI;

                const float_64 time_SI = float_64( currentStep ) * SI::DELTA_T_SI;
${transverse}
${longitudinal}
                const float_64 r2_norm = r2_SI / ( laser_waist_SI * laser_waist_SI );
                const float_64 laser_phase = 2.0 * PI * time_SI * laser_frequency_SI;
                const float_64 laser_rt_profile = math::exp( -r2_norm ) * longitudinal_profile;

                current_comp_${pol} += laser_rt_profile * A0 * A0_to_J * math::cos( laser_phase + ${CEP} );
            }"#,
    ),
    (
        "circular",
        r#"            if( cellIdx.y() == int( ${y_antenna} / SI::CELL_HEIGHT_SI ) )
            {
                constexpr float_64 laser_frequency_SI( SI::SPEED_OF_LIGHT_SI / ${wavelength} );
                constexpr float_64 laser_tau_SI( ${tau} );
                constexpr float_64 laser_delay_SI( ${delay} );
                constexpr float_64 laser_waist_SI( ${waist} );
                constexpr float_64 A0( ${a0} );
                constexpr float_64 A0_to_J = -4.0 * PI * SI::ELECTRON_MASS_SI / ${wavelength} * SI::SPEED_OF_LIGHT_SI / SI::ELECTRON_CHARGE_SI / SI::MUE0_SI / SI::CELL_HEIGHT_SI;

                const float_64 time_SI = float_64( currentStep ) * SI::DELTA_T_SI;
${transverse}
${longitudinal}
                const float_64 r2_norm = r2_SI / ( laser_waist_SI * laser_waist_SI );
                const float_64 laser_phase = 2.0 * PI * time_SI * laser_frequency_SI;
                const float_64 laser_rt_profile = math::exp( -r2_norm ) * longitudinal_profile;

                current_comp_x += laser_rt_profile * A0 * A0_to_J * math::cos( laser_phase + ${CEP} );
                current_comp_z += laser_rt_profile * A0 * A0_to_J * math::sin( laser_phase + ${CEP} );
            }"#,
    ),
];

pub(super) const TRANSVERSE: &[(&str, &str)] = &[
    (
        "2d",
        r#"                constexpr int32_t ix_center( ${center_x} );
                const float_64 distance_x_SI = float_64( cellIdx.x() - ix_center ) * SI::CELL_WIDTH_SI;
                const float_64 r2_SI = distance_x_SI * distance_x_SI;"#,
    ),
    (
        "3d",
        r#"                constexpr int32_t ix_center( ${center_x} );
                constexpr int32_t iz_center( ${center_z} );
                const float_64 distance_x_SI = float_64( cellIdx.x() - ix_center ) * SI::CELL_WIDTH_SI;
                const float_64 distance_z_SI = float_64( cellIdx.z() - iz_center ) * SI::CELL_DEPTH_SI;
                const float_64 r2_SI = distance_x_SI * distance_x_SI + distance_z_SI * distance_z_SI;"#,
    ),
];

pub(super) const LONGITUDINAL: &[(&str, &str)] = &[
    (
        "Gaussian",
        r#"                const float_64 time_centered_norm = ( time_SI - laser_delay_SI ) / laser_tau_SI;
                const float_64 longitudinal_profile = math::exp( -time_centered_norm * time_centered_norm );"#,
    ),
    (
        "Sin2",
        r#"                const float_64 time_centered_norm = ( time_SI - laser_delay_SI ) / laser_tau_SI;
                const float_64 sin2_envelope = math::cos( 0.5 * PI * time_centered_norm );
                const float_64 longitudinal_profile = math::abs( time_centered_norm ) < 1.0 ? sin2_envelope * sin2_envelope : 0.0;"#,
    ),
];
