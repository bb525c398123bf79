mod blood_pressure_test;
